use crate::{
    CarriageError,
    core::{BOARD_COLUMNS, BOARD_ROWS, Board, Cell, Position, SPAWN_ROW, TOP_ROW},
};

/// What a successful carriage action did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CarriageAction {
    /// A piece was lifted into the hold.
    Grabbed { from: Position },
    /// The held piece was placed at `at`, on top of the piece at `behind`
    /// (if the column was not empty).
    Dropped {
        at: Position,
        behind: Option<Position>,
    },
    /// The frontier piece and the piece behind it were exchanged.
    Swapped {
        frontier: Position,
        behind: Position,
    },
}

impl CarriageAction {
    /// Cells whose neighborhood changed, in the order matches must be
    /// evaluated.
    pub fn changed_cells(self) -> impl Iterator<Item = Position> {
        let cells = match self {
            Self::Grabbed { .. } => [None, None],
            Self::Dropped { at, behind } => [Some(at), behind],
            Self::Swapped { frontier, behind } => [Some(behind), Some(frontier)],
        };
        cells.into_iter().flatten()
    }
}

/// The player's cursor above the board, with its single hold slot.
///
/// The carriage works on the *frontier* of its column: the occupied cell
/// nearest the top edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carriage {
    column: usize,
    held: Cell,
}

impl Default for Carriage {
    fn default() -> Self {
        Self::new()
    }
}

impl Carriage {
    pub const START_COLUMN: usize = 3;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            column: Self::START_COLUMN,
            held: Cell::EMPTY,
        }
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The held piece, or `None` if the hold is empty.
    #[must_use]
    pub fn held_piece(&self) -> Option<Cell> {
        (!self.held.is_empty()).then_some(self.held)
    }

    /// Moves back to the start column and empties the hold.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn move_left(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.column = usize::min(self.column + 1, BOARD_COLUMNS - 1);
    }

    /// Position of the frontier cell of the carriage column.
    #[must_use]
    pub fn frontier(&self, board: &Board) -> Option<Position> {
        (TOP_ROW..BOARD_ROWS)
            .map(|row| Position::new(row, self.column))
            .find(|pos| !board.cell_at(*pos).is_empty())
    }

    /// Drops the held piece onto the column, or grabs the frontier piece if
    /// nothing is held.
    ///
    /// # Example
    ///
    /// ```
    /// use rowrise_engine::{Board, Carriage, CarriageAction, CarriageError, Cell, PieceColor, Position};
    ///
    /// let mut board = Board::new();
    /// let mut carriage = Carriage::new();
    /// assert_eq!(carriage.grab_or_drop(&mut board), Err(CarriageError::ColumnEmpty));
    ///
    /// let bottom = Position::new(10, carriage.column());
    /// board.set_cell_at(bottom, Cell::piece(PieceColor::Red));
    /// assert_eq!(
    ///     carriage.grab_or_drop(&mut board),
    ///     Ok(CarriageAction::Grabbed { from: bottom })
    /// );
    /// assert_eq!(carriage.held_piece(), Some(Cell::piece(PieceColor::Red)));
    /// assert!(board.cell_at(bottom).is_empty());
    /// ```
    pub fn grab_or_drop(&mut self, board: &mut Board) -> Result<CarriageAction, CarriageError> {
        let frontier = self.frontier(board);
        if !self.held.is_empty() {
            let at = match frontier {
                None => Position::new(SPAWN_ROW, self.column),
                Some(pos) if pos.row() == TOP_ROW => return Err(CarriageError::ColumnFull),
                Some(pos) => Position::new(pos.row() - 1, self.column),
            };
            board.set_cell_at(at, self.held);
            self.held = Cell::EMPTY;
            return Ok(CarriageAction::Dropped {
                at,
                behind: frontier,
            });
        }

        let from = frontier.ok_or(CarriageError::ColumnEmpty)?;
        let cell = board.cell_at(from);
        if cell.is_locked() {
            return Err(CarriageError::PieceLocked);
        }
        self.held = cell;
        board.set_cell_at(from, Cell::EMPTY);
        Ok(CarriageAction::Grabbed { from })
    }

    /// Exchanges the frontier piece with the piece directly behind it.
    ///
    /// The hold is not involved.
    pub fn swap(&self, board: &mut Board) -> Result<CarriageAction, CarriageError> {
        let frontier = self
            .frontier(board)
            .filter(|pos| pos.row() < SPAWN_ROW)
            .ok_or(CarriageError::NothingToSwap)?;
        let behind = Position::new(frontier.row() + 1, self.column);

        let behind_cell = board.cell_at(behind);
        if behind_cell.is_empty() {
            return Err(CarriageError::NothingToSwap);
        }
        if board.cell_at(frontier).is_locked() || behind_cell.is_locked() {
            return Err(CarriageError::PieceLocked);
        }
        board.swap(frontier, behind);
        Ok(CarriageAction::Swapped { frontier, behind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceColor;

    fn at(row: usize) -> Position {
        Position::new(row, Carriage::START_COLUMN)
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut carriage = Carriage::new();
        for _ in 0..10 {
            carriage.move_left();
        }
        assert_eq!(carriage.column(), 0);
        for _ in 0..10 {
            carriage.move_right();
        }
        assert_eq!(carriage.column(), BOARD_COLUMNS - 1);
        carriage.move_left();
        assert_eq!(carriage.column(), BOARD_COLUMNS - 2);
    }

    #[test]
    fn test_grab_then_drop_on_stack() {
        let mut board = Board::from_bottom_rows(&[
            "...1...", //
            "...2...",
            "...3...",
        ]);
        let mut carriage = Carriage::new();

        assert_eq!(
            carriage.grab_or_drop(&mut board),
            Ok(CarriageAction::Grabbed {
                from: at(SPAWN_ROW - 2)
            })
        );
        assert_eq!(carriage.held_piece(), Some(Cell::piece(PieceColor::Red)));
        assert_eq!(carriage.frontier(&board), Some(at(SPAWN_ROW - 1)));

        carriage.move_left();
        let action = carriage.grab_or_drop(&mut board);
        assert_eq!(
            action,
            Ok(CarriageAction::Dropped {
                at: Position::new(SPAWN_ROW, 2),
                behind: None,
            })
        );
        assert_eq!(carriage.held_piece(), None);
        assert_eq!(
            board.cell_at(Position::new(SPAWN_ROW, 2)),
            Cell::piece(PieceColor::Red)
        );
    }

    #[test]
    fn test_drop_lands_in_front_of_frontier() {
        let mut board = Board::from_bottom_rows(&["...4..."]);
        board.set_cell_at(at(0), Cell::piece(PieceColor::Blue));
        let mut carriage = Carriage::new();

        // The frontier is the cell nearest the top edge, even with holes behind it
        carriage.grab_or_drop(&mut board).unwrap();
        let action = carriage.grab_or_drop(&mut board).unwrap();
        assert_eq!(
            action,
            CarriageAction::Dropped {
                at: at(SPAWN_ROW - 1),
                behind: Some(at(SPAWN_ROW)),
            }
        );
        assert_eq!(
            action.changed_cells().collect::<Vec<_>>(),
            [at(SPAWN_ROW - 1), at(SPAWN_ROW)]
        );
    }

    #[test]
    fn test_drop_refused_on_full_column() {
        let mut board = Board::new();
        for row in 0..BOARD_ROWS {
            board.set_cell_at(at(row), Cell::piece(PieceColor::Green));
        }
        board.set_cell_at(Position::new(SPAWN_ROW, 0), Cell::piece(PieceColor::Red));
        let mut carriage = Carriage::new();
        for _ in 0..Carriage::START_COLUMN {
            carriage.move_left();
        }
        carriage.grab_or_drop(&mut board).unwrap();
        for _ in 0..Carriage::START_COLUMN {
            carriage.move_right();
        }

        let before = board.clone();
        assert_eq!(
            carriage.grab_or_drop(&mut board),
            Err(CarriageError::ColumnFull)
        );
        assert_eq!(board, before);
        assert_eq!(carriage.held_piece(), Some(Cell::piece(PieceColor::Red)));
    }

    #[test]
    fn test_locked_piece_cannot_be_grabbed() {
        let mut board = Board::new();
        board.set_cell_at(at(SPAWN_ROW), Cell::piece(PieceColor::Red).with_lock());
        let mut carriage = Carriage::new();
        assert_eq!(
            carriage.grab_or_drop(&mut board),
            Err(CarriageError::PieceLocked)
        );
        assert_eq!(carriage.held_piece(), None);
    }

    #[test]
    fn test_swap() {
        let mut board = Board::from_bottom_rows(&[
            "...1...", //
            "...2...",
        ]);
        let carriage = Carriage::new();
        let action = carriage.swap(&mut board);

        assert_eq!(
            action,
            Ok(CarriageAction::Swapped {
                frontier: at(SPAWN_ROW - 1),
                behind: at(SPAWN_ROW),
            })
        );
        assert_eq!(board.cell_at(at(SPAWN_ROW - 1)), Cell::piece(PieceColor::Green));
        assert_eq!(board.cell_at(at(SPAWN_ROW)), Cell::piece(PieceColor::Red));
        assert_eq!(
            action.unwrap().changed_cells().collect::<Vec<_>>(),
            [at(SPAWN_ROW), at(SPAWN_ROW - 1)]
        );
    }

    #[test]
    fn test_swap_refused() {
        let carriage = Carriage::new();

        let mut board = Board::new();
        assert_eq!(carriage.swap(&mut board), Err(CarriageError::NothingToSwap));

        let mut board = Board::from_bottom_rows(&["...1..."]);
        assert_eq!(carriage.swap(&mut board), Err(CarriageError::NothingToSwap));

        let mut board = Board::from_bottom_rows(&[
            "...1...", //
            "...2...",
        ]);
        board.set_cell_at(at(SPAWN_ROW), Cell::piece(PieceColor::Green).with_lock());
        assert_eq!(carriage.swap(&mut board), Err(CarriageError::PieceLocked));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::from_bottom_rows(&["...5..."]);
        let mut carriage = Carriage::new();
        carriage.grab_or_drop(&mut board).unwrap();
        carriage.move_right();
        carriage.reset();
        assert_eq!(carriage, Carriage::new());
    }
}
