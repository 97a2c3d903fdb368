use serde::{Deserialize, Serialize};

use crate::{BOARD_ROWS, ConfigError};

/// Probability `numerator / denominator` that a shift seeds a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombChance {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for BombChance {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 3,
        }
    }
}

/// Timing and scoring constants of a round.
///
/// All durations are counted in frames. Missing fields fall back to the
/// defaults when deserializing, so a config file only needs the values it
/// overrides:
///
/// ```
/// use rowrise_engine::RoundConfig;
///
/// let config: RoundConfig = serde_json::from_str(r#"{ "freeze_frames": 45 }"#).unwrap();
/// assert_eq!(config.freeze_frames, 45);
/// assert_eq!(config.shift_delay_frames, RoundConfig::default().shift_delay_frames);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Frames per second the front end ticks the session at.
    pub frames_per_second: u32,
    /// Delay before the first shift step of a round.
    pub initial_delay_frames: u32,
    /// Frames between two shift steps.
    pub shift_delay_frames: u32,
    /// Frames a match is held before it is scored and removed.
    pub freeze_frames: u32,
    /// Shift steps between two row shifts.
    pub shift_span: u32,
    /// Rows generated when a round starts.
    pub starting_rows: usize,
    pub bomb_chance: BombChance,
    /// Points per removed cell.
    pub base_score: usize,
    /// Extra points per removed bonus cell.
    pub bonus_score: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 30,
            initial_delay_frames: 20,
            shift_delay_frames: 10,
            freeze_frames: 30,
            shift_span: 8,
            starting_rows: 4,
            bomb_chance: BombChance::default(),
            base_score: 10,
            bonus_score: 10,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frame_counts = [
            ("frames_per_second", self.frames_per_second),
            ("initial_delay_frames", self.initial_delay_frames),
            ("shift_delay_frames", self.shift_delay_frames),
            ("freeze_frames", self.freeze_frames),
            ("shift_span", self.shift_span),
        ];
        if let Some((name, _)) = frame_counts.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroValue { name });
        }
        if self.starting_rows >= BOARD_ROWS {
            return Err(ConfigError::TooManyStartingRows {
                rows: self.starting_rows,
                limit: BOARD_ROWS,
            });
        }
        let BombChance {
            numerator,
            denominator,
        } = self.bomb_chance;
        if denominator == 0 || numerator > denominator {
            return Err(ConfigError::InvalidBombChance {
                numerator,
                denominator,
            });
        }
        Ok(())
    }
}
