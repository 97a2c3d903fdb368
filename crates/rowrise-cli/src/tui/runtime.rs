use std::{io, time::Duration};

use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use ratatui::DefaultTerminal;

use super::{
    App,
    event_loop::{FrameLoop, LoopEvent, RenderMode},
};

/// Runs an [`App`] inside the terminal's alternate screen.
#[derive(Debug)]
pub struct Runtime {
    events: FrameLoop,
    key_release_events: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: FrameLoop::new(),
            key_release_events: false,
        }
    }

    /// Sets the frame rate (frames per second). `None` stops frame events.
    pub fn set_frame_rate(&mut self, rate: Option<f64>) {
        self.events
            .set_frame_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Returns `true` if the terminal reports key releases, so held keys can
    /// be tracked across frames.
    #[must_use]
    pub fn has_key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// 1. Enables key release and focus reporting when the terminal supports
    ///    them
    /// 2. Calls [`App::init`]
    /// 3. Dispatches frame, render and terminal events to the application
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            // Queried after raw mode is enabled; the flags are pushed onto
            // the alternate screen's stack.
            self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if self.key_release_events {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES),
                    EnableFocusChange
                )?;
            }
            app.init(&mut self);

            let result = self.dispatch(terminal, app);

            if self.key_release_events {
                execute!(io::stdout(), PopKeyboardEnhancementFlags, DisableFocusChange)?;
            }
            result
        })
    }

    fn dispatch<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                LoopEvent::Frame => app.update(self),
                LoopEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                LoopEvent::Terminal(event) => app.handle_event(self, &event),
            }
        }
        Ok(())
    }
}
