//! Minimal terminal runtime: a fixed-rate frame loop on top of `ratatui`.

use crossterm::event::Event;
use ratatui::Frame;

pub use self::{event_loop::RenderMode, runtime::Runtime};

mod event_loop;
mod runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once the terminal is ready, before the first event.
    ///
    /// Use this to configure the frame rate.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one frame.
    fn update(&mut self, runtime: &mut Runtime);
}
