// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback clock.
//!
//! While playing, the observed time is `from + (now - anchor)` where `now` is
//! read from a monotonic [`TimeSource`]. Nothing is accumulated per frame, so
//! a slow or skipped callback never introduces drift.
//!
//! Every `play` and `pause` (and reaching the end) starts a new generation.
//! A frame loop holds the [`PlaybackTicket`] it was started with and stops as
//! soon as [`PlaybackClock::advance`] reports it stale.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Monotonic clock read by the playback clock
pub trait TimeSource: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall-clock time source backed by [`tokio::time::Instant`].
///
/// Inside a runtime with paused time this follows the virtual clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTimeSource {
    origin: tokio::time::Instant,
}

impl MonotonicTimeSource {
    /// Start measuring from now
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced time source for scrubbing tools and tests.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Arc<Mutex<Duration>>,
}

impl ManualTimeSource {
    /// Start at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Move time forward by fractional seconds
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Clock state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    /// Holding a fixed time
    Stopped {
        /// Stored project time
        at: f64,
    },
    /// Advancing with the time source
    Playing {
        /// Project time when playback was anchored
        from: f64,
        /// Time source reading when playback was anchored
        anchor: Duration,
    },
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped { at: 0.0 }
    }
}

/// Proof of which play session a frame loop belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackTicket(u64);

/// Result of advancing the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    /// Observed project time
    pub time: f64,
    /// Playback has stopped and no further frames will follow
    pub finished: bool,
}

/// Play/pause/seek state machine bounded by the project duration
#[derive(Debug)]
pub struct PlaybackClock<S: TimeSource = MonotonicTimeSource> {
    source: S,
    state: PlaybackState,
    duration: f64,
    generation: u64,
}

impl PlaybackClock<MonotonicTimeSource> {
    /// Create a stopped clock at zero reading wall-clock time
    pub fn new(duration: f64) -> Self {
        Self::with_source(MonotonicTimeSource::new(), duration)
    }
}

impl<S: TimeSource> PlaybackClock<S> {
    /// Create a stopped clock at zero reading `source`
    pub fn with_source(source: S, duration: f64) -> Self {
        Self {
            source,
            state: PlaybackState::default(),
            duration: sanitize_duration(duration).unwrap_or_else(|| {
                tracing::warn!(duration, "Ignoring invalid playback duration");
                0.0
            }),
            generation: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Upper bound of playback
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the clock is advancing
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Ticket of the current generation
    pub fn ticket(&self) -> PlaybackTicket {
        PlaybackTicket(self.generation)
    }

    /// Whether `ticket` belongs to the current generation
    pub fn is_current(&self, ticket: PlaybackTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Change the playback bound. A stopped time past the new end is pulled back.
    pub fn set_duration(&mut self, requested: f64) {
        let valid = sanitize_duration(requested);
        let duration = valid.unwrap_or(0.0);
        if duration == self.duration {
            return;
        }
        if valid.is_none() {
            tracing::warn!(duration = requested, "Ignoring invalid playback duration");
        }
        self.duration = duration;
        if let PlaybackState::Stopped { at } = &mut self.state {
            *at = at.min(duration);
        }
    }

    /// Observed time, clamped to the duration. Does not change state.
    pub fn current_time(&self) -> f64 {
        match self.state {
            PlaybackState::Stopped { at } => at,
            PlaybackState::Playing { from, anchor } => {
                let elapsed = self.source.now().saturating_sub(anchor).as_secs_f64();
                (from + elapsed).min(self.duration)
            }
        }
    }

    /// Start playing from the stored time. Playing again is a no-op that
    /// returns the running session's ticket.
    pub fn play(&mut self) -> PlaybackTicket {
        if let PlaybackState::Stopped { at } = self.state {
            self.generation += 1;
            self.state = PlaybackState::Playing {
                from: at,
                anchor: self.source.now(),
            };
            tracing::debug!(time = at, "Playback started");
        }
        self.ticket()
    }

    /// Stop at the current observed time
    pub fn pause(&mut self) {
        if self.is_playing() {
            let at = self.current_time();
            self.generation += 1;
            self.state = PlaybackState::Stopped { at };
            tracing::debug!(time = at, "Playback paused");
        }
    }

    /// Play if stopped, pause if playing. Returns the ticket when playback starts.
    pub fn toggle(&mut self) -> Option<PlaybackTicket> {
        if self.is_playing() {
            self.pause();
            None
        } else {
            Some(self.play())
        }
    }

    /// Jump to `time`, clamped into `[0, duration]`.
    ///
    /// While playing, playback continues from the new position and the
    /// current ticket stays valid.
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.duration)
        };
        self.state = match self.state {
            PlaybackState::Stopped { .. } => PlaybackState::Stopped { at: time },
            PlaybackState::Playing { .. } => PlaybackState::Playing {
                from: time,
                anchor: self.source.now(),
            },
        };
        tracing::debug!(time, playing = self.is_playing(), "Seeked");
    }

    /// Sample the clock for the frame loop holding `ticket`.
    ///
    /// Returns `None` if the ticket is stale; the caller must stop without
    /// touching any state. Reaching the duration stops the clock exactly at
    /// the duration.
    pub fn advance(&mut self, ticket: PlaybackTicket) -> Option<ClockSample> {
        if !self.is_current(ticket) {
            return None;
        }
        Some(self.sample())
    }

    /// Sample the clock, applying the end-of-project stop.
    pub fn sample(&mut self) -> ClockSample {
        match self.state {
            PlaybackState::Stopped { at } => ClockSample {
                time: at,
                finished: true,
            },
            PlaybackState::Playing { from, anchor } => {
                let elapsed = self.source.now().saturating_sub(anchor).as_secs_f64();
                let observed = from + elapsed;
                if observed >= self.duration {
                    self.generation += 1;
                    self.state = PlaybackState::Stopped { at: self.duration };
                    tracing::debug!(time = self.duration, "Playback reached end");
                    ClockSample {
                        time: self.duration,
                        finished: true,
                    }
                } else {
                    ClockSample {
                        time: observed,
                        finished: false,
                    }
                }
            }
        }
    }
}

fn sanitize_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}
