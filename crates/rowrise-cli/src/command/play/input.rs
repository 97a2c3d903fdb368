use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rowrise_engine::InputFrame;

/// Returns `true` if a direction held for `frame` frames moves the carriage
/// on that frame.
///
/// Fires on the 1st and 6th frame, then on every odd frame from the 9th.
fn fires(frame: u32) -> bool {
    frame == 1 || frame == 6 || (frame >= 9 && frame % 2 == 1)
}

/// Frames a direction key has been held, or `None` if it is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKey(Option<u32>);

impl HeldKey {
    fn press(&mut self) -> bool {
        let was_up = self.0.is_none();
        if was_up {
            self.0 = Some(0);
        }
        was_up
    }

    fn release(&mut self) {
        self.0 = None;
    }

    fn advance(&mut self) -> bool {
        match &mut self.0 {
            Some(frames) => {
                *frames += 1;
                fires(*frames)
            }
            None => false,
        }
    }
}

/// Turns key events into one [`InputFrame`] per game frame.
///
/// With key release reporting, a held direction repeats on the schedule of
/// [`fires`] and the terminal's own auto-repeat is ignored. Without it, every
/// press or repeat event moves the carriage once.
#[derive(Debug, Clone, Default)]
pub(super) struct InputCollector {
    track_held_keys: bool,
    left: HeldKey,
    right: HeldKey,
    pending: InputFrame,
}

impl InputCollector {
    pub(super) fn new(track_held_keys: bool) -> Self {
        Self {
            track_held_keys,
            ..Self::default()
        }
    }

    pub(super) fn handle_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Left => {
                self.handle_direction(event.kind, Direction::Left);
            }
            KeyCode::Right => {
                self.handle_direction(event.kind, Direction::Right);
            }
            _ if event.kind != KeyEventKind::Press => {}
            KeyCode::Char(' ') | KeyCode::Down => self.pending.grab_or_drop = true,
            KeyCode::Char('x' | 'z') | KeyCode::Up => self.pending.swap = true,
            KeyCode::Enter | KeyCode::Char('c') => self.pending.confirm = true,
            _ => {}
        }
    }

    fn handle_direction(&mut self, kind: KeyEventKind, direction: Direction) {
        let (held, moved) = match direction {
            Direction::Left => (&mut self.left, &mut self.pending.move_left),
            Direction::Right => (&mut self.right, &mut self.pending.move_right),
        };
        if !self.track_held_keys {
            *moved |= kind != KeyEventKind::Release;
            return;
        }
        match kind {
            // A press fires on the next frame even if the key is released
            // before that frame runs.
            KeyEventKind::Press => *moved |= held.press(),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => held.release(),
        }
    }

    /// Returns the input of the next frame and advances held keys.
    pub(super) fn take_frame(&mut self) -> InputFrame {
        let mut frame = std::mem::take(&mut self.pending);
        frame.move_left |= self.left.advance();
        frame.move_right |= self.right.advance();
        frame
    }

    /// Forgets held keys, e.g. when the terminal loses focus and releases
    /// would be missed.
    pub(super) fn release_all(&mut self) {
        self.left.release();
        self.right.release();
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_fire_schedule() {
        let fired = (1..=15).filter(|frame| fires(*frame)).collect::<Vec<_>>();
        assert_eq!(fired, [1, 6, 9, 11, 13, 15]);
    }

    #[test]
    fn test_held_direction_repeats() {
        let mut input = InputCollector::new(true);
        input.handle_key(&press(KeyCode::Right));
        let moves = (1..=12)
            .filter(|_| {
                let frame = input.take_frame();
                assert!(!frame.move_left);
                frame.move_right
            })
            .count();
        // Frames 1, 6, 9 and 11
        assert_eq!(moves, 4);

        // Auto-repeat events from the terminal do not add moves
        input.handle_key(&repeat(KeyCode::Right));
        assert!(input.take_frame().move_right);
        assert!(!input.take_frame().move_right);

        input.handle_key(&release(KeyCode::Right));
        assert!((0..20).all(|_| !input.take_frame().move_right));
    }

    #[test]
    fn test_tap_between_frames_moves_once() {
        let mut input = InputCollector::new(true);
        input.handle_key(&press(KeyCode::Left));
        input.handle_key(&release(KeyCode::Left));
        assert!(input.take_frame().move_left);
        assert!(!input.take_frame().move_left);
    }

    #[test]
    fn test_fallback_moves_per_event() {
        let mut input = InputCollector::new(false);
        input.handle_key(&press(KeyCode::Left));
        input.handle_key(&repeat(KeyCode::Left));
        assert!(input.take_frame().move_left);
        // No held state without release events
        assert!((0..20).all(|_| !input.take_frame().move_left));
    }

    #[test]
    fn test_actions_are_edge_triggered() {
        let mut input = InputCollector::new(true);
        input.handle_key(&press(KeyCode::Char(' ')));
        input.handle_key(&press(KeyCode::Char('x')));
        input.handle_key(&press(KeyCode::Enter));
        input.handle_key(&release(KeyCode::Enter));
        input.handle_key(&repeat(KeyCode::Char(' ')));
        let frame = input.take_frame();
        assert!(frame.grab_or_drop && frame.swap && frame.confirm);
        assert_eq!(input.take_frame(), InputFrame::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputCollector::new(true);
        input.handle_key(&press(KeyCode::Right));
        input.take_frame();
        input.release_all();
        assert!((0..20).all(|_| !input.take_frame().move_right));
    }
}
