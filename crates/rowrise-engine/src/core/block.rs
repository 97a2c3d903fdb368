use super::{
    board::{BOARD_COLUMNS, BOARD_ROWS, Board, Position},
    cell::{Cell, LockState, PieceColor},
};

/// What a renderer should draw at one grid position.
///
/// Unlike [`Cell`], a `Block` carries no traversal state and folds the
/// flag combinations into the handful of sprites a front end needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceColor),
    Bomb(PieceColor),
    /// Locked by a match, scored at the base rate.
    Matched(PieceColor),
    /// Locked by a large match, scored with the bonus.
    Combo(PieceColor),
    /// Occupied cell whose content is concealed (paused game).
    Hidden,
}

impl Block {
    #[must_use]
    pub fn from_cell(cell: Cell) -> Self {
        let Some(color) = cell.base_color() else {
            return Self::Empty;
        };
        match cell.lock_state() {
            Some(LockState::Matched) => Self::Matched(color),
            Some(LockState::Combo) => Self::Combo(color),
            None if cell.is_bomb() => Self::Bomb(color),
            None => Self::Piece(color),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// Render snapshot of the whole board.
///
/// # Example
///
/// ```
/// use rowrise_engine::{Block, BlockBoard, Board};
///
/// let board = BlockBoard::from_board(&Board::new());
/// assert!(board.rows().flatten().all(|block| block.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBoard {
    rows: [[Block; BOARD_COLUMNS]; BOARD_ROWS],
}

impl BlockBoard {
    pub const INITIAL: Self = Self {
        rows: [[Block::Empty; BOARD_COLUMNS]; BOARD_ROWS],
    };

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let mut blocks = Self::INITIAL;
        for pos in Position::all() {
            blocks.rows[pos.row()][pos.column()] = Block::from_cell(board.cell_at(pos));
        }
        blocks
    }

    /// Like [`Self::from_board`], but every occupied cell becomes [`Block::Hidden`].
    #[must_use]
    pub fn concealed(board: &Board) -> Self {
        let mut blocks = Self::from_board(board);
        for block in blocks.rows.iter_mut().flatten() {
            if !block.is_empty() {
                *block = Block::Hidden;
            }
        }
        blocks
    }

    #[must_use]
    pub fn block_at(&self, pos: Position) -> Block {
        self.rows[pos.row()][pos.column()]
    }

    /// Iterates over the rows from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_COLUMNS]> {
        self.rows.iter()
    }
}
