//! Visibility state machine: debounce, fade animation and auto-hide.
//!
//! All waiting is expressed as deadlines advanced by a cooperative tick
//! (the GTK loop calls [`OverlayState::tick`] every [`TICK`]), so the UI
//! thread never blocks and every pending action can be cancelled by
//! clearing its field.  The struct is pure data with injected
//! timestamps, which keeps the timing guarantees unit-testable without
//! a running main loop.
//!
//! Lifecycle:
//!
//! ```text
//! hidden ──trigger──▶ (debounce) ──▶ showing (fade 0→1)
//!    ▲                                   │
//!    │                                   ▼
//! hiding (fade 1→0) ◀──deadline── visible-holding
//! ```
//!
//! Re-triggering while visible restarts the hold deadline, so the pill
//! stays up for "time since last switch", not "time since first".

use crate::config::OverlayConfig;
use std::time::{Duration, Instant};

/// Interval of the cooperative UI tick (~60 Hz).
pub const TICK: Duration = Duration::from_millis(16);

/// The timing knobs the state machine runs on.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Window for coalescing trigger bursts.
    pub debounce: Duration,
    /// How long the pill holds full visibility after a show.
    pub display: Duration,
    /// Fade-in duration.
    pub fade_in: Duration,
    /// Fade-out duration.
    pub fade_out: Duration,
}

impl From<&OverlayConfig> for Timings {
    fn from(cfg: &OverlayConfig) -> Self {
        Self {
            debounce: Duration::from_millis(cfg.debounce_ms),
            display: Duration::from_millis(cfg.display_ms),
            fade_in: Duration::from_millis(cfg.fade_in_ms),
            fade_out: Duration::from_millis(cfg.fade_out_ms),
        }
    }
}

/// An in-flight linear fade.
#[derive(Debug, Clone, Copy)]
struct Fade {
    target: f64,
    /// Signed per-tick opacity delta.
    step: f64,
}

/// What a tick decided; the caller translates this into widget calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tick {
    /// The debounce window elapsed: refresh workspace state and show.
    pub show_due: bool,
    /// The opacity changed; queue a redraw.
    pub redraw: bool,
    /// A fade-out just reached zero; the window can be blanked.
    pub faded_out: bool,
}

/// Debounce, fade and auto-hide state, owned by the UI thread.
#[derive(Debug)]
pub struct OverlayState {
    timings: Timings,
    opacity: f64,
    fade: Option<Fade>,
    hide_at: Option<Instant>,
    debounce_until: Option<Instant>,
}

impl OverlayState {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            opacity: 0.0,
            fade: None,
            hide_at: None,
            debounce_until: None,
        }
    }

    /// Current animation opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Register a trigger request (workspace event or manual signal).
    ///
    /// (Re-)arms the debounce deadline, replacing any pending one: a
    /// burst of triggers spaced under the window collapses into a
    /// single show, fired from the timestamp of the last call.
    pub fn trigger(&mut self, now: Instant) {
        self.debounce_until = Some(now + self.timings.debounce);
    }

    /// Start showing: fade in and arm the auto-hide deadline.
    ///
    /// Called after a `show_due` tick once the caller has refreshed the
    /// workspace state and decided not to suppress the show.  Cancels
    /// any pending hide or in-flight fade first.
    pub fn begin_show(&mut self, now: Instant) {
        self.hide_at = Some(now + self.timings.display);
        self.fade_to(1.0, self.timings.fade_in);
    }

    /// Begin a linear fade of `opacity` toward `target`.
    ///
    /// Replaces any in-flight fade.  The per-tick step is sized so the
    /// fade completes in `duration` at the [`TICK`] rate; a duration
    /// shorter than one tick jumps in a single step.
    fn fade_to(&mut self, target: f64, duration: Duration) {
        let steps = (duration.as_millis() / TICK.as_millis()).max(1) as f64;
        self.fade = Some(Fade {
            target,
            step: (target - self.opacity) / steps,
        });
    }

    /// Advance deadlines and the fade by one tick.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let mut out = Tick::default();

        if self.debounce_until.is_some_and(|t| now >= t) {
            self.debounce_until = None;
            out.show_due = true;
        }

        if self.hide_at.is_some_and(|t| now >= t) {
            self.hide_at = None;
            self.fade_to(0.0, self.timings.fade_out);
        }

        if let Some(fade) = self.fade {
            self.opacity += fade.step;
            // Direction-aware termination: stops exactly at the target
            // regardless of floating-point overshoot.
            let done = if fade.step >= 0.0 {
                self.opacity >= fade.target
            } else {
                self.opacity <= fade.target
            };
            if done {
                self.opacity = fade.target;
                self.fade = None;
                out.faded_out = fade.target <= 0.0;
            }
            out.redraw = true;
        }

        out
    }
}
