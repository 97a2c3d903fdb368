use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use rowrise_engine::{BOARD_COLUMNS, BOARD_ROWS, Block, BlockBoard};

use crate::view::widgets::BlockDisplay;

/// The board grid, with the carriage row above it.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a BlockBoard,
    carriage: Option<(usize, Option<Block>)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a BlockBoard) -> Self {
        Self {
            board,
            carriage: None,
            block: None,
        }
    }

    /// Shows the carriage over `column`, carrying `held` if any.
    pub fn carriage(self, column: usize, held: Option<Block>) -> Self {
        Self {
            carriage: Some((column, held)),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        columns() * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        (rows() + 1) * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[expect(clippy::cast_possible_truncation)]
const fn columns() -> u16 {
    BOARD_COLUMNS as u16
}

#[expect(clippy::cast_possible_truncation)]
const fn rows() -> u16 {
    BOARD_ROWS as u16
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [carriage_area, grid_area] = Layout::vertical([
            Constraint::Length(BlockDisplay::height()),
            Constraint::Length(rows() * BlockDisplay::height()),
        ])
        .areas(area);

        let horizontal = Layout::horizontal(
            (0..BOARD_COLUMNS).map(|_| Constraint::Length(BlockDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..BOARD_ROWS).map(|_| Constraint::Length(BlockDisplay::height())));

        let carriage_cells = carriage_area.layout::<BOARD_COLUMNS>(&horizontal);
        for (column, cell_area) in carriage_cells.into_iter().enumerate() {
            let display = match self.carriage {
                Some((carriage_column, held)) if carriage_column == column => held
                    .map_or(BlockDisplay::CARRIAGE, |block| {
                        BlockDisplay::from_block(block, false)
                    }),
                _ => BlockDisplay::blank(),
            };
            display.render(cell_area, buf);
        }

        let grid_cells = grid_area
            .layout::<BOARD_ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_COLUMNS>(&horizontal));
        for (grid_row, row) in iter::zip(grid_cells, self.board.rows()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(*block, true).render(grid_cell, buf);
            }
        }
    }
}
