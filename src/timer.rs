//! Countdown and visibility timers advanced once per tick.

use serde::{Deserialize, Serialize};

/// Interval and visible window for a gated entity, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleConfig {
    pub interval: f32,
    pub visible_for: f32,
}

/// Phase change produced by [`VisibilityTimer::advance`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    /// The dormant interval elapsed; the entity must be re-placed.
    Appeared,
    /// The visible window ran out; the entity stays where it was.
    Expired,
}

/// Two-phase dormant/visible cycle for a bonus apple or bomb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTimer {
    config: CycleConfig,
    elapsed: f32,
    visible: bool,
    visible_elapsed: f32,
}

impl VisibilityTimer {
    /// Starts dormant with both counters at zero.
    #[must_use]
    pub fn new(config: CycleConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            visible: false,
            visible_elapsed: 0.0,
        }
    }

    /// Adds `dt` to the dormant accumulator.
    ///
    /// The dormant accumulator keeps running while visible; it is cleared
    /// when the entity appears.
    pub fn accumulate(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Runs the phase logic once; at most one transition per call.
    ///
    /// `dt` only feeds the visible window, the dormant side must already have
    /// been fed through [`Self::accumulate`].
    pub fn advance(&mut self, dt: f32) -> Option<Transition> {
        if self.visible {
            self.visible_elapsed += dt;
            if self.visible_elapsed >= self.config.visible_for {
                self.visible = false;
                self.visible_elapsed = 0.0;
                return Some(Transition::Expired);
            }
            return None;
        }

        if self.elapsed >= self.config.interval {
            self.visible = true;
            self.elapsed = 0.0;
            self.visible_elapsed = 0.0;
            return Some(Transition::Appeared);
        }

        None
    }

    /// Forces the visible phase with a fresh window.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.elapsed = 0.0;
        self.visible_elapsed = 0.0;
    }

    /// Forces the dormant phase after the entity was consumed.
    pub fn consume(&mut self) {
        self.visible = false;
        self.elapsed = 0.0;
        self.visible_elapsed = 0.0;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub fn visible_elapsed(&self) -> f32 {
        self.visible_elapsed
    }
}

/// Plain repeating interval, used for the wall-shrink cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn accumulate(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Per-round timers. Disabled systems hold `None` and never accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerBank {
    pub bonus: VisibilityTimer,
    pub hazard: Option<VisibilityTimer>,
    pub shrink: Option<IntervalTimer>,
}

impl TimerBank {
    /// Feeds `dt` to every enabled timer.
    pub fn accumulate(&mut self, dt: f32) {
        self.bonus.accumulate(dt);
        if let Some(hazard) = self.hazard.as_mut() {
            hazard.accumulate(dt);
        }
        if let Some(shrink) = self.shrink.as_mut() {
            shrink.accumulate(dt);
        }
    }

    /// Returns true when the shrink cadence is enabled and has elapsed.
    #[must_use]
    pub fn shrink_due(&self) -> bool {
        self.shrink.is_some_and(|shrink| shrink.is_due())
    }

    #[must_use]
    pub fn hazard_visible(&self) -> bool {
        self.hazard.is_some_and(|hazard| hazard.is_visible())
    }
}
