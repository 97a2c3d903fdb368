use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use rowrise_engine::{Block as BoardBlock, GameSession, Mode};

use crate::view::widgets::{BoardDisplay, HoldDisplay, SessionStatsDisplay, color, style};

/// The whole play field: hold slot and stats next to the board, with the
/// menu, pause and game over popups drawn over the board.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    fn popup(&self) -> Option<(Text<'static>, Style)> {
        match self.session.mode() {
            Mode::Playing => None,
            Mode::MainMenu => Some((
                Text::from(vec![Line::from("ROWRISE"), Line::from("PRESS ENTER")]),
                Style::new().fg(color::BLACK).bg(color::CYAN),
            )),
            Mode::Paused => Some((
                Text::from("PAUSED"),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            Mode::GameOver => Some((
                Text::from("GAME OVER!!"),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(1, 0);
        let border_style = match self.session.mode() {
            Mode::MainMenu => color::CYAN,
            Mode::Playing => color::WHITE,
            Mode::Paused => color::YELLOW,
            Mode::GameOver => color::RED,
        };

        let block_board = self.session.block_board();
        let board = {
            let widget = BoardDisplay::new(&block_board).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            if self.session.mode().is_playing() {
                let held = self.session.held_piece().map(BoardBlock::from_cell);
                widget.carriage(self.session.carriage().column(), held)
            } else {
                widget
            }
        };
        let hold_panel = HoldDisplay::new(
            self.session
                .held_piece()
                .filter(|_| !self.session.is_overlay_shown())
                .map(BoardBlock::from_cell),
        )
        .block(
            Block::bordered()
                .title(Line::from("HOLD").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, board_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), session_stats.width())),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(session_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);

        let board_width = board.width();
        hold_panel.render(hold_area, buf);
        session_stats.render(stats_area, buf);
        board.render(board_area, buf);

        if let Some((text, style)) = self.popup() {
            let text_height = u16::try_from(text.height()).unwrap_or(u16::MAX);
            let popup = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = popup.inner(area);
            Clear.render(area, buf);
            popup.render(area, buf);
            text.style(style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(text_height)), buf);
        }
    }
}
