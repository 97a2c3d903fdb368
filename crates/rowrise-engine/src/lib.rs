pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a carriage action is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CarriageError {
    #[display("no room left in the carriage column")]
    ColumnFull,
    #[display("nothing to grab in the carriage column")]
    ColumnEmpty,
    #[display("piece is locked by a pending match")]
    PieceLocked,
    #[display("no pair of pieces to swap in the carriage column")]
    NothingToSwap,
}

/// Invalid [`RoundConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("`{name}` must be at least 1")]
    ZeroValue { name: &'static str },
    #[display("`starting_rows` must be less than {limit} (got {rows})")]
    TooManyStartingRows { rows: usize, limit: usize },
    #[display("invalid bomb chance {numerator}/{denominator}")]
    InvalidBombChance { numerator: u32, denominator: u32 },
}
