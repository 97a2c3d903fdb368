use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use rowrise_engine::{GameSession, Mode};

use crate::{
    command::play::input::InputCollector,
    tui::{App, RenderMode, Runtime},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const MENU_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["Enter"],
        action: "Start",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

const PLAY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["←", "→"],
        action: "Move",
    },
    KeyBinding {
        keys: &["Space", "↓"],
        action: "Grab/Drop",
    },
    KeyBinding {
        keys: &["X", "↑"],
        action: "Swap",
    },
    KeyBinding {
        keys: &["Enter"],
        action: "Pause",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

const PAUSED_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["Enter"],
        action: "Resume",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["Enter"],
        action: "Main Menu",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

#[derive(Debug)]
pub(super) struct PlayApp {
    session: GameSession,
    input: InputCollector,
    is_exiting: bool,
}

impl PlayApp {
    pub(super) fn new(session: GameSession) -> Self {
        Self {
            session,
            input: InputCollector::default(),
            is_exiting: false,
        }
    }

    /// Best score seen so far, including a round that is still running.
    pub(super) fn high_score(&self) -> usize {
        usize::max(self.session.high_score(), self.session.score())
    }

    fn bindings(&self) -> &'static [KeyBinding] {
        match self.session.mode() {
            Mode::MainMenu => MENU_BINDINGS,
            Mode::Playing => PLAY_BINDINGS,
            Mode::Paused => PAUSED_BINDINGS,
            Mode::GameOver => GAME_OVER_BINDINGS,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        let fps = f64::from(self.session.round().config().frames_per_second);
        runtime.set_frame_rate(Some(fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(fps));
        self.input = InputCollector::new(runtime.has_key_release_events());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        match event {
            Event::Key(key) => {
                let is_quit = matches!(key.code, KeyCode::Char('q'))
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if is_quit && key.kind == KeyEventKind::Press {
                    self.is_exiting = true;
                } else {
                    self.input.handle_key(key);
                }
            }
            Event::FocusLost => self.input.release_all(),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(14), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(self.bindings()), help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let input = self.input.take_frame();
        self.session.tick(&input);
    }
}
