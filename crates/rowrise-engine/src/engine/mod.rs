//! Rules and timing built on top of the board model.
//!
//! - [`evaluate_match`] - Match detection, group locking and bomb detonation
//! - [`fill_new_row`] / [`seed_bomb`] - Randomized row generation ([`RowGenerator`])
//! - [`compact_columns`] - Gravity after matched cells are removed
//! - [`Carriage`] - The player's cursor and hold slot
//! - [`RoundClock`] - Frame counters for shifts and freezes
//! - [`Round`] - One round: board, carriage, clock and score
//! - [`GameSession`] - Mode state machine (menu, play, pause, game over) and high score
//!
//! # Round Flow
//!
//! 1. The round starts with a few generated rows at the bottom
//! 2. The player grabs, drops and swaps pieces in the carriage column
//! 3. Every change is checked for matches; a match freezes the board
//! 4. When the freeze elapses, matched cells are scored and removed, the
//!    columns settle and the moved cells are checked again (cascade)
//! 5. Without a freeze, the board periodically rises by one row and a new
//!    row is generated
//! 6. The round ends when the board has to rise while the top row is occupied
//!
//! # Example
//!
//! ```
//! use rowrise_engine::{GameSession, InputFrame, RoundConfig};
//!
//! let mut session = GameSession::new(RoundConfig::default()).unwrap();
//! session.tick(&InputFrame { confirm: true, ..InputFrame::default() });
//!
//! // Grab the frontier piece of the carriage column and put it back
//! let grab = InputFrame { grab_or_drop: true, ..InputFrame::default() };
//! session.tick(&grab);
//! assert!(session.held_piece().is_some());
//! session.tick(&grab);
//! assert!(session.held_piece().is_none());
//! ```

pub use self::{
    carriage::*, clock::*, config::*, gravity::*, matching::*, round::*, row_generator::*,
    session::*,
};

mod carriage;
mod clock;
mod config;
mod gravity;
mod matching;
mod round;
mod row_generator;
mod session;
