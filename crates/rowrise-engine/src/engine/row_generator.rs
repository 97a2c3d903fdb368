use std::{fmt, num::ParseIntError, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{BOARD_COLUMNS, Board, Cell, PieceColor, Position, SPAWN_ROW};

use super::{config::BombChance, matching::MATCH_THRESHOLD};

/// Fills the spawn row with pieces so that no group reaches [`MATCH_THRESHOLD`].
///
/// Columns are filled left to right. Each column tries the five colors in
/// a freshly shuffled order and keeps the first one whose group (merged
/// with its left and upper neighbors) stays below the threshold and lets
/// the remaining columns be filled too; otherwise the column is emptied
/// again and the search backtracks.
///
/// # Panics
///
/// Panics if no valid row exists, which cannot happen on a board without
/// pre-existing matches.
pub fn fill_new_row<R>(board: &mut Board, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for column in 0..BOARD_COLUMNS {
        board.set_cell_at(Position::new(SPAWN_ROW, column), Cell::EMPTY);
    }
    let filled = fill_from(board, rng, 0);
    assert!(filled, "row generation exhausted every color choice\n{board}");
}

fn fill_from<R>(board: &mut Board, rng: &mut R, column: usize) -> bool
where
    R: Rng + ?Sized,
{
    if column == BOARD_COLUMNS {
        return true;
    }

    let pos = Position::new(SPAWN_ROW, column);
    let mut colors = PieceColor::ALL;
    colors.shuffle(rng);
    for color in colors {
        board.set_cell_at(pos, Cell::piece(color));
        if board.count_connected(pos) < MATCH_THRESHOLD && fill_from(board, rng, column + 1) {
            return true;
        }
    }
    board.set_cell_at(pos, Cell::EMPTY);
    false
}

/// Possibly turns one spawn row piece into a bomb.
///
/// With probability `chance`, a uniformly random column is picked. The
/// piece there becomes a bomb only if it has no same-colored neighbor, so
/// a bomb never spawns already primed. Returns where the bomb was placed.
pub fn seed_bomb<R>(board: &mut Board, rng: &mut R, chance: BombChance) -> Option<Position>
where
    R: Rng + ?Sized,
{
    if !rng.random_ratio(chance.numerator, chance.denominator) {
        return None;
    }
    let pos = Position::new(SPAWN_ROW, rng.random_range(0..BOARD_COLUMNS));
    let cell = board.cell_at(pos);
    if cell.is_empty() || board.count_connected(pos) != 1 {
        return None;
    }
    board.set_cell_at(pos, cell.with_bomb_flag());
    Some(pos)
}

/// Seeded source of new rows and bombs.
///
/// # Example
///
/// ```
/// use rowrise_engine::{Board, BoardSeed, RowGenerator};
/// use rand::Rng as _;
///
/// let seed: BoardSeed = rand::rng().random();
/// let mut first = Board::new();
/// let mut second = Board::new();
/// RowGenerator::with_seed(seed).fill_new_row(&mut first);
/// RowGenerator::with_seed(seed).fill_new_row(&mut second);
///
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct RowGenerator {
    rng: Pcg32,
}

impl Default for RowGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RowGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: BoardSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// See [`fill_new_row`].
    pub fn fill_new_row(&mut self, board: &mut Board) {
        fill_new_row(board, &mut self.rng);
    }

    /// See [`seed_bomb`].
    pub fn seed_bomb(&mut self, board: &mut Board, chance: BombChance) -> Option<Position> {
        seed_bomb(board, &mut self.rng, chance)
    }
}

/// 128-bit seed for deterministic row generation.
///
/// Written as a 32 character hex string, both by [`fmt::Display`] and in
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {text}")]
    InvalidDigits { text: String, source: ParseIntError },
}

impl BoardSeed {
    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::InvalidLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|source| SeedParseError::InvalidDigits {
            text: s.to_owned(),
            source,
        })?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows `rng.random::<BoardSeed>()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}
