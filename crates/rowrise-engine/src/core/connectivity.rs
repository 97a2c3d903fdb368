//! Same-color group analysis over the board.
//!
//! The traversal keeps its visited state inside the cells themselves
//! ([`VisitTag`]) instead of a scratch buffer, and the worklist is a fixed
//! [`ArrayVec`], so a query never allocates.

use arrayvec::ArrayVec;

use super::{
    board::{BOARD_CELLS, Board, Position},
    cell::{PieceColor, VisitTag},
};

pub(crate) type Worklist = ArrayVec<Position, BOARD_CELLS>;

impl Board {
    /// Counts the 4-connected cells sharing the base color of the cell at `start`.
    ///
    /// The first pass marks the group with [`VisitTag::First`] while
    /// counting. The second pass walks the same cells, swapping the mark
    /// for [`VisitTag::Second`], then every mark is removed. Board contents
    /// are identical before and after the call.
    ///
    /// # Panics
    ///
    /// Panics if the cell at `start` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rowrise_engine::{Board, Cell, PieceColor, Position};
    ///
    /// let mut board = Board::new();
    /// for column in 0..3 {
    ///     board.set_cell_at(Position::new(10, column), Cell::piece(PieceColor::Blue));
    /// }
    /// board.set_cell_at(Position::new(9, 2), Cell::bomb(PieceColor::Blue));
    ///
    /// assert_eq!(board.count_connected(Position::new(10, 0)), 4);
    /// assert!(!board.has_visit_marks());
    /// ```
    pub fn count_connected(&mut self, start: Position) -> usize {
        let color = self
            .cell_at(start)
            .base_color()
            .unwrap_or_else(|| panic!("connectivity query started on empty cell {start:?}"));

        let counted = self.mark_group(start, color);
        let unmarked = self.unmark_group(start, color);
        debug_assert_eq!(counted, unmarked);
        debug_assert!(!self.has_visit_marks());
        counted
    }

    fn mark_group(&mut self, start: Position, color: PieceColor) -> usize {
        let mut stack = Worklist::new();
        let mut count = 0;

        self.set_cell_at(start, self.cell_at(start).with_visited(VisitTag::First));
        stack.push(start);
        while let Some(pos) = stack.pop() {
            count += 1;
            for next in pos.neighbors() {
                let cell = self.cell_at(next);
                if cell.has_color(color) && !cell.has_visited(VisitTag::First) {
                    self.set_cell_at(next, cell.with_visited(VisitTag::First));
                    stack.push(next);
                }
            }
        }
        count
    }

    fn unmark_group(&mut self, start: Position, color: PieceColor) -> usize {
        let mut stack = Worklist::new();
        let mut visited = Worklist::new();

        self.set_cell_at(start, self.cell_at(start).with_visited(VisitTag::Second));
        stack.push(start);
        while let Some(pos) = stack.pop() {
            visited.push(pos);
            for next in pos.neighbors() {
                let cell = self.cell_at(next);
                // Only cells marked by the first pass belong to the group
                if cell.has_color(color) && cell.has_visited(VisitTag::First) {
                    self.set_cell_at(next, cell.with_visited(VisitTag::Second));
                    stack.push(next);
                }
            }
        }

        for &pos in &visited {
            let cell = self.cell_at(pos);
            self.set_cell_at(pos, cell.cleared_visited(VisitTag::Second));
        }
        visited.len()
    }
}
