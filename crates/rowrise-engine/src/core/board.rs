use std::fmt::{self, Write as _};

use super::cell::Cell;

pub const BOARD_ROWS: usize = 11;
pub const BOARD_COLUMNS: usize = 7;
pub const BOARD_CELLS: usize = BOARD_ROWS * BOARD_COLUMNS;

/// Row checked for game over before each shift.
pub const TOP_ROW: usize = 0;
/// Row that receives freshly generated pieces after each shift.
pub const SPAWN_ROW: usize = BOARD_ROWS - 1;

/// Coordinates of a grid position.
///
/// Row 0 is the top (game-over edge), row 10 is the bottom (spawn edge).
/// Column 0 is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the 11×7 grid.
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        assert!(
            row < BOARD_ROWS && column < BOARD_COLUMNS,
            "position ({row}, {column}) is outside the board"
        );
        Self { row, column }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }

    /// Iterates over the in-bounds 4-neighbors (up, right, down, left).
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        let Self { row, column } = self;
        [
            row.checked_sub(1).map(|row| Self { row, column }),
            (column + 1 < BOARD_COLUMNS).then(|| Self {
                row,
                column: column + 1,
            }),
            (row + 1 < BOARD_ROWS).then(|| Self { row: row + 1, column }),
            column.checked_sub(1).map(|column| Self { row, column }),
        ]
        .into_iter()
        .flatten()
    }

    /// Iterates over every position, row by row from the top.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLUMNS).map(move |column| Self { row, column }))
    }
}

/// The 11×7 playfield.
///
/// Logical rows are mapped onto physical storage through a ring offset, so
/// [`Board::rotate_up`] moves no cell data: it advances the offset and
/// recycles the discarded top row as the new bottom row.
///
/// # Example
///
/// ```
/// use rowrise_engine::{Board, Cell, PieceColor, Position, SPAWN_ROW, TOP_ROW};
///
/// let mut board = Board::new();
/// let bottom = Position::new(SPAWN_ROW, 0);
/// board.set_cell_at(bottom, Cell::piece(PieceColor::Red));
///
/// for _ in 0..SPAWN_ROW {
///     board.rotate_up();
/// }
/// assert_eq!(board.cell_at(Position::new(TOP_ROW, 0)), Cell::piece(PieceColor::Red));
/// assert!(board.is_top_row_occupied());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_COLUMNS]; BOARD_ROWS],
    top: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[Cell::EMPTY; BOARD_COLUMNS]; BOARD_ROWS],
        top: 0,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    fn physical_row(&self, row: usize) -> usize {
        debug_assert!(row < BOARD_ROWS);
        (self.top + row) % BOARD_ROWS
    }

    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cells[self.physical_row(pos.row)][pos.column]
    }

    pub fn set_cell_at(&mut self, pos: Position, cell: Cell) {
        let row = self.physical_row(pos.row);
        self.cells[row][pos.column] = cell;
    }

    /// Returns the cells of a logical row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell; BOARD_COLUMNS] {
        assert!(row < BOARD_ROWS, "row {row} is outside the board");
        &self.cells[self.physical_row(row)]
    }

    /// Iterates over the logical rows from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_COLUMNS]> {
        (0..BOARD_ROWS).map(move |row| &self.cells[self.physical_row(row)])
    }

    /// Shifts every row up by one.
    ///
    /// The top row's content is discarded and its storage becomes the new,
    /// empty bottom row.
    pub fn rotate_up(&mut self) {
        let recycled = self.top;
        self.top = (self.top + 1) % BOARD_ROWS;
        self.cells[recycled] = [Cell::EMPTY; BOARD_COLUMNS];
        debug_assert_eq!(self.physical_row(SPAWN_ROW), recycled);
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Exchanges the full state of two cells.
    pub fn swap(&mut self, a: Position, b: Position) {
        let cell_a = self.cell_at(a);
        let cell_b = self.cell_at(b);
        self.set_cell_at(a, cell_b);
        self.set_cell_at(b, cell_a);
    }

    #[must_use]
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(TOP_ROW).iter().any(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn has_locked_cells(&self) -> bool {
        self.cells.iter().flatten().any(|cell| cell.is_locked())
    }

    /// Returns `true` if any cell still carries a traversal mark.
    #[must_use]
    pub fn has_visit_marks(&self) -> bool {
        self.cells.iter().flatten().any(|cell| cell.has_any_visit())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    #[cfg(test)]
    pub(crate) fn physical_row_of(&self, row: usize) -> usize {
        self.physical_row(row)
    }

    /// Builds a board whose bottom rows are given top to bottom, one string
    /// per row, using the symbols of [`Cell::symbol`].
    #[cfg(test)]
    pub(crate) fn from_bottom_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_ROWS);
        let mut board = Self::new();
        let first_row = BOARD_ROWS - rows.len();
        for (offset, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), BOARD_COLUMNS, "bad row {line:?}");
            for (column, symbol) in line.chars().enumerate() {
                board.set_cell_at(
                    Position::new(first_row + offset, column),
                    Cell::from_symbol(symbol),
                );
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                f.write_char(cell.symbol())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::PieceColor;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        for pos in Position::all() {
            assert_eq!(board.cell_at(pos), Cell::EMPTY, "at {pos:?}");
        }
        assert!(!board.is_top_row_occupied());
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_set_and_get_cell() {
        let mut board = Board::new();
        let pos = Position::new(4, 5);
        board.set_cell_at(pos, Cell::bomb(PieceColor::Yellow));
        assert_eq!(board.cell_at(pos), Cell::bomb(PieceColor::Yellow));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_position_row_out_of_range() {
        let _ = Position::new(BOARD_ROWS, 0);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_position_column_out_of_range() {
        let _ = Position::new(0, BOARD_COLUMNS);
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let corner: Vec<_> = Position::new(0, 0).neighbors().collect();
        assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);

        let corner: Vec<_> = Position::new(SPAWN_ROW, BOARD_COLUMNS - 1)
            .neighbors()
            .collect();
        assert_eq!(
            corner,
            vec![
                Position::new(SPAWN_ROW - 1, BOARD_COLUMNS - 1),
                Position::new(SPAWN_ROW, BOARD_COLUMNS - 2),
            ]
        );

        assert_eq!(Position::new(5, 3).neighbors().count(), 4);
    }

    #[test]
    fn test_all_positions() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), BOARD_CELLS);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[BOARD_CELLS - 1], Position::new(SPAWN_ROW, BOARD_COLUMNS - 1));
    }

    #[test]
    fn test_rotate_up_shifts_rows() {
        let mut board = Board::from_bottom_rows(&["1234512", "2345123"]);
        board.rotate_up();

        let expected = Board::from_bottom_rows(&["1234512", "2345123", "......."]);
        assert_eq!(board.to_string(), expected.to_string());
    }

    #[test]
    fn test_rotate_up_discards_top_row() {
        let mut board = Board::new();
        board.set_cell_at(Position::new(TOP_ROW, 2), Cell::piece(PieceColor::Red));
        assert!(board.is_top_row_occupied());

        board.rotate_up();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.row(SPAWN_ROW), &[Cell::EMPTY; BOARD_COLUMNS]);
    }

    #[test]
    fn test_rotate_up_remaps_without_losing_rows() {
        let mut board = Board::new();
        let mut seen = [false; BOARD_ROWS];
        for _ in 0..BOARD_ROWS {
            board.rotate_up();
            seen[board.physical_row_of(SPAWN_ROW)] = true;

            let mut physical: Vec<_> = (0..BOARD_ROWS)
                .map(|row| board.physical_row_of(row))
                .collect();
            physical.sort_unstable();
            physical.dedup();
            assert_eq!(physical.len(), BOARD_ROWS);
        }
        // Every storage row served as the spawn row exactly once
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::from_bottom_rows(&["1234512"]);
        board.rotate_up();
        board.clear();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_swap() {
        let mut board = Board::new();
        let a = Position::new(3, 1);
        let b = Position::new(9, 6);
        board.set_cell_at(a, Cell::piece(PieceColor::Green).with_lock());
        board.set_cell_at(b, Cell::bomb(PieceColor::Blue));

        board.swap(a, b);
        assert_eq!(board.cell_at(a), Cell::bomb(PieceColor::Blue));
        assert_eq!(board.cell_at(b), Cell::piece(PieceColor::Green).with_lock());
    }

    #[test]
    fn test_display() {
        let board = Board::from_bottom_rows(&["1.a....", "5432..e"]);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_ROWS);
        assert_eq!(lines[SPAWN_ROW - 1], "1.a....");
        assert_eq!(lines[SPAWN_ROW], "5432..e");
        assert_eq!(lines[0], ".......");
    }
}
