use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, hold_display::*, key_binding_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod hold_display;
mod key_binding_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;
    use rowrise_engine::PieceColor;

    pub const RED: Color = Color::Rgb(230, 40, 40);
    pub const GREEN: Color = Color::Rgb(40, 200, 60);
    pub const BLUE: Color = Color::Rgb(50, 90, 240);
    pub const YELLOW: Color = Color::Rgb(240, 220, 0);
    pub const PURPLE: Color = Color::Rgb(170, 60, 220);
    pub const CYAN: Color = Color::Rgb(0, 220, 220);
    pub const GRAY: Color = Color::Rgb(110, 110, 110);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const fn piece(color: PieceColor) -> Color {
        match color {
            PieceColor::Red => RED,
            PieceColor::Green => GREEN,
            PieceColor::Blue => BLUE,
            PieceColor::Yellow => YELLOW,
            PieceColor::Purple => PURPLE,
        }
    }
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};
    use rowrise_engine::PieceColor;

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const HIDDEN: Style = bg_only(color::GRAY);
    pub const CARRIAGE: Style = fg_bg(color::WHITE, color::BLACK);

    pub const fn piece(color: PieceColor) -> Style {
        bg_only(color::piece(color))
    }

    pub const fn bomb(color: PieceColor) -> Style {
        fg_bg(color::BLACK, color::piece(color)).add_modifier(Modifier::BOLD)
    }

    /// Locked cells are drawn as outlines until they are removed.
    pub const fn matched(color: PieceColor) -> Style {
        fg_bg(color::piece(color), color::BLACK)
    }

    pub const fn combo(color: PieceColor) -> Style {
        fg_bg(color::WHITE, color::piece(color)).add_modifier(Modifier::BOLD)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
