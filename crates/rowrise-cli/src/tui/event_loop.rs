use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Events produced by [`FrameLoop::next`].
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum LoopEvent {
    /// One frame of game time elapsed.
    Frame,
    Render,
    Terminal(Event),
}

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Redraw after every frame or terminal event.
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Schedules frame and render events between terminal events.
///
/// Without a frame interval only terminal events (and the renders they
/// trigger) are produced.
#[derive(Debug)]
pub(super) struct FrameLoop {
    frame_interval: Option<Duration>,
    render_mode: RenderMode,
    next_frame_at: Instant,
    last_render: Instant,
    dirty: bool,
}

impl FrameLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_interval: None,
            render_mode: RenderMode::default(),
            next_frame_at: now,
            last_render: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
            dirty: true,
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
        self.next_frame_at = Instant::now();
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next frame, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.frame_interval
                && now >= self.next_frame_at
            {
                // Frames are scheduled on a fixed grid so game time does not
                // drift, but a stalled loop does not replay missed frames.
                self.next_frame_at += interval;
                if self.next_frame_at < now {
                    self.next_frame_at = now + interval;
                }
                self.dirty = true;
                return Ok(LoopEvent::Frame);
            }

            if self.is_render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn is_render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_frame_at = self.frame_interval.map(|_| self.next_frame_at);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let wake_at = [next_frame_at, next_render_at].into_iter().flatten().min()?;
        Some(wake_at.saturating_duration_since(now))
    }
}
