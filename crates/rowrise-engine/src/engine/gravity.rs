use crate::core::{BOARD_COLUMNS, BOARD_ROWS, Board, Position, SPAWN_ROW};

/// How one column changed during [`compact_columns`].
///
/// Both values are depths counted from the spawn row (depth 0 is
/// [`SPAWN_ROW`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSettlement {
    /// Depth of the lowest hole before compaction, or the stack height if
    /// the column had none.
    pub first_hole: usize,
    /// Number of occupied cells, which is also the stack height after
    /// compaction.
    pub height: usize,
}

impl ColumnSettlement {
    /// Rows whose content changed during compaction.
    pub fn moved_rows(self) -> impl DoubleEndedIterator<Item = usize> {
        (self.first_hole..self.height.max(self.first_hole)).map(|depth| SPAWN_ROW - depth)
    }
}

fn depth_to_pos(depth: usize, column: usize) -> Position {
    Position::new(SPAWN_ROW - depth, column)
}

/// Slides every occupied cell toward the spawn row, closing all holes.
///
/// The relative order of the cells in a column is preserved.
///
/// # Example
///
/// ```
/// use rowrise_engine::{Board, Cell, PieceColor, Position, compact_columns};
///
/// let mut board = Board::new();
/// board.set_cell_at(Position::new(7, 0), Cell::piece(PieceColor::Red));
///
/// let settlements = compact_columns(&mut board);
/// assert_eq!(settlements[0].first_hole, 0);
/// assert_eq!(settlements[0].height, 1);
/// assert!(!board.cell_at(Position::new(10, 0)).is_empty());
/// ```
pub fn compact_columns(board: &mut Board) -> [ColumnSettlement; BOARD_COLUMNS] {
    let mut settlements = [ColumnSettlement::default(); BOARD_COLUMNS];
    for (column, settlement) in settlements.iter_mut().enumerate() {
        *settlement = compact_column(board, column);
    }
    settlements
}

fn compact_column(board: &mut Board, column: usize) -> ColumnSettlement {
    let first_hole = (0..BOARD_ROWS)
        .find(|depth| board.cell_at(depth_to_pos(*depth, column)).is_empty())
        .unwrap_or(BOARD_ROWS);

    let mut height = first_hole;
    for depth in first_hole..BOARD_ROWS {
        let pos = depth_to_pos(depth, column);
        if board.cell_at(pos).is_empty() {
            continue;
        }
        board.swap(pos, depth_to_pos(height, column));
        height += 1;
    }

    ColumnSettlement { first_hole, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, PieceColor, TOP_ROW};

    fn column_symbols(board: &Board, column: usize) -> String {
        (0..BOARD_ROWS)
            .map(|depth| board.cell_at(depth_to_pos(depth, column)).symbol())
            .collect()
    }

    #[test]
    fn test_holes_close_in_order() {
        let mut board = Board::new();
        let cells = [
            (2, Cell::piece(PieceColor::Red)),
            (4, Cell::bomb(PieceColor::Green)),
            (5, Cell::piece(PieceColor::Blue)),
        ];
        for (depth, cell) in cells {
            board.set_cell_at(depth_to_pos(depth, 3), cell);
        }

        let settlements = compact_columns(&mut board);
        assert_eq!(column_symbols(&board, 3), "1b3........");
        assert_eq!(
            settlements[3],
            ColumnSettlement {
                first_hole: 0,
                height: 3,
            }
        );
        assert_eq!(
            settlements[3].moved_rows().collect::<Vec<_>>(),
            [SPAWN_ROW, SPAWN_ROW - 1, SPAWN_ROW - 2]
        );
    }

    #[test]
    fn test_settled_column_is_unchanged() {
        let mut board = Board::from_bottom_rows(&[
            "1......", //
            "2......",
            "3......",
        ]);
        let before = board.clone();
        let settlements = compact_columns(&mut board);

        assert_eq!(board, before);
        assert_eq!(
            settlements[0],
            ColumnSettlement {
                first_hole: 3,
                height: 3,
            }
        );
        assert_eq!(settlements[0].moved_rows().count(), 0);
        assert_eq!(settlements[1], ColumnSettlement::default());
    }

    #[test]
    fn test_gap_in_stack() {
        let mut board = Board::from_bottom_rows(&[
            ".4.....", //
            ".4.....",
            ".......",
            ".5.....",
        ]);
        let settlements = compact_columns(&mut board);

        assert_eq!(column_symbols(&board, 1), "544........");
        assert_eq!(
            settlements[1],
            ColumnSettlement {
                first_hole: 1,
                height: 3,
            }
        );
        assert_eq!(
            settlements[1].moved_rows().collect::<Vec<_>>(),
            [SPAWN_ROW - 1, SPAWN_ROW - 2]
        );
    }

    #[test]
    fn test_full_column_and_top_cell() {
        let mut board = Board::new();
        for row in 0..BOARD_ROWS {
            board.set_cell_at(Position::new(row, 6), Cell::piece(PieceColor::Purple));
        }
        board.set_cell_at(Position::new(TOP_ROW, 0), Cell::piece(PieceColor::Red));

        let settlements = compact_columns(&mut board);
        assert_eq!(settlements[6].first_hole, BOARD_ROWS);
        assert_eq!(settlements[6].height, BOARD_ROWS);
        assert!(!board.cell_at(Position::new(SPAWN_ROW, 0)).is_empty());
        assert!(board.cell_at(Position::new(TOP_ROW, 0)).is_empty());
        assert_eq!(settlements[0].moved_rows().count(), 1);
    }

    #[test]
    fn test_flags_travel_with_cells() {
        let mut board = Board::new();
        let locked = Cell::piece(PieceColor::Yellow).with_bonus();
        board.set_cell_at(Position::new(4, 2), locked);
        compact_columns(&mut board);
        assert_eq!(board.cell_at(Position::new(SPAWN_ROW, 2)), locked);
        assert_eq!(board.occupied_count(), 1);
    }
}
