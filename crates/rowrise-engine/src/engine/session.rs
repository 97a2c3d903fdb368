use std::time::Duration;

use rand::Rng as _;

use crate::{
    ConfigError,
    core::{BlockBoard, Cell},
};

use super::{
    carriage::Carriage,
    config::RoundConfig,
    round::Round,
    row_generator::BoardSeed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Mode {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

/// Abstract input of one frame.
///
/// Direction flags are already filtered by the front end's repeat policy;
/// the other flags are edge-triggered presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub grab_or_drop: bool,
    pub swap: bool,
    /// Starts a round, pauses, resumes, or leaves the game over screen.
    pub confirm: bool,
}

/// Mode state machine around a [`Round`], with the high score.
///
/// ```text
/// MainMenu ──confirm──► Playing ◄──confirm──► Paused
///    ▲                     │
///    └──confirm── GameOver ◄┘ topped out
/// ```
///
/// # Example
///
/// ```
/// use rowrise_engine::{GameSession, InputFrame, Mode, RoundConfig};
///
/// let mut session = GameSession::new(RoundConfig::default()).unwrap();
/// assert_eq!(session.mode(), Mode::MainMenu);
///
/// let confirm = InputFrame { confirm: true, ..InputFrame::default() };
/// session.tick(&confirm);
/// assert_eq!(session.mode(), Mode::Playing);
///
/// session.tick(&InputFrame::default());
/// session.tick(&confirm);
/// assert_eq!(session.mode(), Mode::Paused);
/// assert!(session.is_overlay_shown());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    round: Round,
    mode: Mode,
    high_score: usize,
    total_frames: u64,
}

impl GameSession {
    /// Creates a session in the main menu, with a random seed.
    ///
    /// Fails when `config` does not pass [`RoundConfig::validate`].
    pub fn new(config: RoundConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic rows.
    pub fn with_seed(config: RoundConfig, seed: BoardSeed) -> Result<Self, ConfigError> {
        Ok(Self {
            round: Round::new(config, seed)?,
            mode: Mode::MainMenu,
            high_score: 0,
            total_frames: 0,
        })
    }

    /// Sets the high score carried over from earlier sessions.
    #[must_use]
    pub fn with_high_score(mut self, high_score: usize) -> Self {
        self.high_score = high_score;
        self
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.round.score()
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    #[must_use]
    pub fn carriage(&self) -> &Carriage {
        self.round.carriage()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<Cell> {
        self.round.carriage().held_piece()
    }

    /// Shift steps left before the board rises by one row.
    #[must_use]
    pub fn remaining_shift(&self) -> u32 {
        self.round.clock().remaining_shift()
    }

    /// Returns `true` while the board is covered by the paused or game over
    /// screen.
    #[must_use]
    pub fn is_overlay_shown(&self) -> bool {
        matches!(self.mode, Mode::Paused | Mode::GameOver)
    }

    /// Render snapshot of the board, concealed behind an overlay.
    #[must_use]
    pub fn block_board(&self) -> BlockBoard {
        if self.is_overlay_shown() {
            BlockBoard::concealed(self.round.board())
        } else {
            BlockBoard::from_board(self.round.board())
        }
    }

    /// Playing time of the current round.
    #[must_use]
    pub fn duration(&self) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let fps = u64::from(self.round.config().frames_per_second);
        let secs = self.total_frames / fps;
        let nanos = (self.total_frames % fps) * NANOS_PER_SEC / fps;
        Duration::from_secs(secs) + Duration::from_nanos(nanos)
    }

    /// Advances the session by one frame.
    ///
    /// Input is applied before the round's clock advances. Outside of
    /// [`Mode::Playing`] only `confirm` is read.
    pub fn tick(&mut self, input: &InputFrame) {
        match self.mode {
            Mode::MainMenu => {
                if input.confirm {
                    self.round.restart();
                    self.total_frames = 0;
                    self.mode = Mode::Playing;
                }
            }
            Mode::Paused => {
                if input.confirm {
                    self.mode = Mode::Playing;
                }
            }
            Mode::GameOver => {
                if input.confirm {
                    self.high_score = usize::max(self.high_score, self.round.score());
                    self.mode = Mode::MainMenu;
                }
            }
            Mode::Playing => {
                self.apply_input(input);
                if self.mode.is_playing() {
                    self.total_frames += 1;
                    if self.round.tick().is_topped_out() {
                        self.mode = Mode::GameOver;
                    }
                }
            }
        }
    }

    fn apply_input(&mut self, input: &InputFrame) {
        if input.move_right {
            self.round.move_right();
        }
        if input.move_left {
            self.round.move_left();
        }
        // Refused actions leave the board untouched
        if input.swap {
            _ = self.round.swap();
        } else if input.grab_or_drop {
            _ = self.round.grab_or_drop();
        } else if input.confirm {
            self.mode = Mode::Paused;
        }
    }
}
