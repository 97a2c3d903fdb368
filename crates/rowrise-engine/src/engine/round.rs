use crate::{
    CarriageError, ConfigError,
    core::{Board, Cell, Position},
};

use super::{
    carriage::{Carriage, CarriageAction},
    clock::{ClockEvent, RoundClock},
    config::RoundConfig,
    gravity::compact_columns,
    matching::{MatchOutcome, evaluate_match},
    row_generator::{BoardSeed, RowGenerator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundEvent {
    Continue,
    ToppedOut,
}

/// State of a single round: the board, the carriage, timers and score.
///
/// A new round is empty until [`Self::restart`] is called.
#[derive(Debug, Clone)]
pub struct Round {
    config: RoundConfig,
    board: Board,
    carriage: Carriage,
    clock: RoundClock,
    generator: RowGenerator,
    score: usize,
}

impl Round {
    /// Creates an empty round after checking `config`.
    pub fn new(config: RoundConfig, seed: BoardSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: RoundClock::new(&config),
            config,
            board: Board::new(),
            carriage: Carriage::new(),
            generator: RowGenerator::with_seed(seed),
            score: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn carriage(&self) -> &Carriage {
        &self.carriage
    }

    #[must_use]
    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Clears everything and generates the starting rows, without bombs.
    pub fn restart(&mut self) {
        self.board.clear();
        for _ in 0..self.config.starting_rows {
            self.board.rotate_up();
            self.generator.fill_new_row(&mut self.board);
        }
        self.carriage.reset();
        self.clock = RoundClock::new(&self.config);
        self.score = 0;
    }

    pub fn move_left(&mut self) {
        self.carriage.move_left();
    }

    pub fn move_right(&mut self) {
        self.carriage.move_right();
    }

    pub fn grab_or_drop(&mut self) -> Result<CarriageAction, CarriageError> {
        let action = self.carriage.grab_or_drop(&mut self.board)?;
        self.evaluate_changed(action);
        Ok(action)
    }

    pub fn swap(&mut self) -> Result<CarriageAction, CarriageError> {
        let action = self.carriage.swap(&mut self.board)?;
        self.evaluate_changed(action);
        Ok(action)
    }

    fn evaluate_changed(&mut self, action: CarriageAction) {
        for pos in action.changed_cells() {
            self.evaluate_at(pos);
        }
    }

    /// Runs [`evaluate_match`] at `pos` and freezes the round on a match.
    pub fn evaluate_at(&mut self, pos: Position) -> MatchOutcome {
        let outcome = evaluate_match(&mut self.board, pos, self.clock.is_frozen());
        if outcome.is_match() {
            self.clock.freeze(&self.config);
        }
        outcome
    }

    /// Advances the round by one frame.
    ///
    /// Shifts the board when a shift is due, or resolves the pending
    /// matches when the freeze elapses.
    pub fn tick(&mut self) -> RoundEvent {
        match self.clock.tick(&self.config) {
            ClockEvent::Waiting | ClockEvent::Stepped => {}
            ClockEvent::FreezeElapsed => {
                self.resolve_freeze();
            }
            ClockEvent::ShiftDue => {
                if self.board.is_top_row_occupied() {
                    return RoundEvent::ToppedOut;
                }
                self.clock.restart_shift(&self.config);
                self.board.rotate_up();
                self.generator.fill_new_row(&mut self.board);
                self.generator
                    .seed_bomb(&mut self.board, self.config.bomb_chance);
            }
        }
        RoundEvent::Continue
    }

    /// Scores and removes every locked cell, lets the columns settle and
    /// evaluates cascades on the cells that moved.
    ///
    /// Moved ordinary pieces are evaluated before moved bombs. The round
    /// stays frozen while any locked cell remains. Returns the points
    /// awarded.
    pub fn resolve_freeze(&mut self) -> usize {
        let mut points = 0;
        for pos in Position::all() {
            let cell = self.board.cell_at(pos);
            if !cell.is_locked() {
                continue;
            }
            points += self.config.base_score;
            if cell.is_bonus() {
                points += self.config.bonus_score;
            }
            self.board.set_cell_at(pos, Cell::EMPTY);
        }
        self.score += points;

        let settlements = compact_columns(&mut self.board);
        for bombs in [false, true] {
            for (column, settlement) in settlements.iter().enumerate() {
                for row in settlement.moved_rows() {
                    let pos = Position::new(row, column);
                    let cell = self.board.cell_at(pos);
                    if cell.is_bomb() == bombs && !cell.is_locked() {
                        self.evaluate_at(pos);
                    }
                }
            }
        }

        if self.clock.is_frozen() {
            self.clock
                .finish_freeze(self.board.has_locked_cells(), &self.config);
        }
        points
    }

    #[cfg(test)]
    pub(crate) fn with_board(config: RoundConfig, board: Board) -> Self {
        let mut round = Self::new(config, BoardSeed::from_u128(0)).unwrap();
        round.board = board;
        round
    }
}
