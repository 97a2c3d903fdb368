use super::config::RoundConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ClockEvent {
    Waiting,
    Stepped,
    ShiftDue,
    FreezeElapsed,
}

/// Frame counters sequencing shifts and freezes.
///
/// ```text
///            not frozen                      frozen
/// delay 0 ─► delay = shift delay       delay 0 ─► FreezeElapsed
///            shift -= 1                          (round resolves, then
///            shift 0 ─► ShiftDue                  calls finish_freeze)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundClock {
    remaining_delay: u32,
    remaining_shift: u32,
    frozen: bool,
}

impl RoundClock {
    #[must_use]
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            remaining_delay: config.initial_delay_frames,
            remaining_shift: config.shift_span,
            frozen: false,
        }
    }

    /// Frames left before the next shift step or freeze check.
    #[must_use]
    pub fn remaining_delay(&self) -> u32 {
        self.remaining_delay
    }

    /// Shift steps left before the next row shift.
    #[must_use]
    pub fn remaining_shift(&self) -> u32 {
        self.remaining_shift
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Advances the clock by one frame.
    pub fn tick(&mut self, config: &RoundConfig) -> ClockEvent {
        self.remaining_delay = self.remaining_delay.saturating_sub(1);
        if self.remaining_delay > 0 {
            return ClockEvent::Waiting;
        }
        if self.frozen {
            return ClockEvent::FreezeElapsed;
        }

        self.remaining_delay = config.shift_delay_frames;
        self.remaining_shift = self.remaining_shift.saturating_sub(1);
        if self.remaining_shift == 0 {
            ClockEvent::ShiftDue
        } else {
            ClockEvent::Stepped
        }
    }

    /// Starts a new shift span after the board shifted.
    pub fn restart_shift(&mut self, config: &RoundConfig) {
        self.remaining_shift = config.shift_span;
    }

    /// Enters the frozen state, unless a freeze is already running.
    ///
    /// Returns `true` if the clock was not frozen before.
    pub fn freeze(&mut self, config: &RoundConfig) -> bool {
        if self.frozen {
            return false;
        }
        self.frozen = true;
        self.remaining_delay = config.freeze_frames;
        true
    }

    /// Re-arms the delay after a freeze resolution pass.
    ///
    /// Stays frozen for another freeze duration if locked cells remain,
    /// otherwise resumes the shift cadence.
    pub fn finish_freeze(&mut self, locked_cells_remain: bool, config: &RoundConfig) {
        debug_assert!(self.frozen);
        if locked_cells_remain {
            self.remaining_delay = config.freeze_frames;
        } else {
            self.frozen = false;
            self.remaining_delay = config.shift_delay_frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_until(
        clock: &mut RoundClock,
        config: &RoundConfig,
        event: ClockEvent,
    ) -> (usize, ClockEvent) {
        for frame in 1..10_000 {
            let got = clock.tick(config);
            if got == event {
                return (frame, got);
            }
        }
        panic!("{event:?} never happened");
    }

    #[test]
    fn test_initial_state() {
        let config = RoundConfig::default();
        let clock = RoundClock::new(&config);
        assert_eq!(clock.remaining_delay(), config.initial_delay_frames);
        assert_eq!(clock.remaining_shift(), config.shift_span);
        assert!(!clock.is_frozen());
    }

    #[test]
    fn test_first_shift_timing() {
        let config = RoundConfig::default();
        let mut clock = RoundClock::new(&config);

        // Initial delay, then one shift delay per remaining step
        let expected =
            config.initial_delay_frames + (config.shift_span - 1) * config.shift_delay_frames;
        let (frames, _) = tick_until(&mut clock, &config, ClockEvent::ShiftDue);
        assert_eq!(frames, expected as usize);
        assert_eq!(clock.remaining_shift(), 0);

        clock.restart_shift(&config);
        let (frames, _) = tick_until(&mut clock, &config, ClockEvent::ShiftDue);
        assert_eq!(frames, (config.shift_span * config.shift_delay_frames) as usize);
    }

    #[test]
    fn test_step_events() {
        let config = RoundConfig {
            initial_delay_frames: 1,
            shift_delay_frames: 2,
            ..RoundConfig::default()
        };
        let mut clock = RoundClock::new(&config);
        assert_eq!(clock.tick(&config), ClockEvent::Stepped);
        assert_eq!(clock.tick(&config), ClockEvent::Waiting);
        assert_eq!(clock.tick(&config), ClockEvent::Stepped);
        assert_eq!(clock.remaining_shift(), config.shift_span - 2);
    }

    #[test]
    fn test_freeze_blocks_shift_steps() {
        let config = RoundConfig::default();
        let mut clock = RoundClock::new(&config);
        assert!(clock.freeze(&config));
        assert!(!clock.freeze(&config));
        assert_eq!(clock.remaining_delay(), config.freeze_frames);

        for _ in 1..config.freeze_frames {
            assert_eq!(clock.tick(&config), ClockEvent::Waiting);
        }
        assert_eq!(clock.tick(&config), ClockEvent::FreezeElapsed);
        assert_eq!(clock.remaining_shift(), config.shift_span);
    }

    #[test]
    fn test_finish_freeze_keeps_or_releases() {
        let config = RoundConfig::default();
        let mut clock = RoundClock::new(&config);
        clock.freeze(&config);
        tick_until(&mut clock, &config, ClockEvent::FreezeElapsed);

        clock.finish_freeze(true, &config);
        assert!(clock.is_frozen());
        assert_eq!(clock.remaining_delay(), config.freeze_frames);

        tick_until(&mut clock, &config, ClockEvent::FreezeElapsed);
        clock.finish_freeze(false, &config);
        assert!(!clock.is_frozen());
        assert_eq!(clock.remaining_delay(), config.shift_delay_frames);
    }
}
