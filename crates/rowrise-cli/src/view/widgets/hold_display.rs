use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use rowrise_engine::Block;

use crate::view::widgets::BlockDisplay;

/// The carriage's hold slot.
#[derive(Debug)]
pub struct HoldDisplay<'a> {
    held: Option<Block>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> HoldDisplay<'a> {
    pub fn new(held: Option<Block>) -> Self {
        Self { held, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        3 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for HoldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let Some(held) = self.held else {
            return;
        };
        let area = area.centered(
            Constraint::Length(BlockDisplay::width()),
            Constraint::Length(BlockDisplay::height()),
        );
        BlockDisplay::from_block(held, false).render(area, buf);
    }
}
