// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cooperative frame loop for preview playback.
//!
//! The loop wakes once per display frame, samples the [`PlaybackClock`],
//! composites the project at the sampled time and hands the frame to a
//! [`FrameSink`]. It ends when playback reaches the project end or when its
//! ticket goes stale because someone paused or restarted playback.

use crate::compositor::{frame_at, Frame};
use crate::playback::{MonotonicTimeSource, PlaybackClock, PlaybackTicket, TimeSource};
use crate::shared::SharedProject;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Receives composited frames.
///
/// The playback clock is locked while `present` runs; a sink must not lock it.
pub trait FrameSink: Send {
    /// Draw one frame
    fn present(&mut self, frame: &Frame<'_>);
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame<'_>) + Send,
{
    fn present(&mut self, frame: &Frame<'_>) {
        self(frame);
    }
}

/// Why a frame loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Playback reached the project end
    Finished,
    /// Playback was paused or restarted elsewhere
    Cancelled,
}

/// Drives a shared clock and project at a fixed callback rate
pub struct PlaybackDriver<S: TimeSource = MonotonicTimeSource> {
    project: SharedProject,
    clock: Arc<Mutex<PlaybackClock<S>>>,
    frame_interval: Duration,
}

impl<S: TimeSource> Clone for PlaybackDriver<S> {
    fn clone(&self) -> Self {
        Self {
            project: self.project.clone(),
            clock: Arc::clone(&self.clock),
            frame_interval: self.frame_interval,
        }
    }
}

impl<S: TimeSource + 'static> PlaybackDriver<S> {
    /// Create a driver calling back `frame_rate` times per second
    pub fn new(project: SharedProject, clock: Arc<Mutex<PlaybackClock<S>>>, frame_rate: f64) -> Self {
        let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            tracing::warn!(frame_rate, "Invalid preview frame rate, using 60");
            60.0
        };

        Self {
            project,
            clock,
            frame_interval: Duration::from_secs_f64(1.0 / frame_rate),
        }
    }

    /// The shared clock, for play/pause/seek from the UI
    pub fn clock(&self) -> &Arc<Mutex<PlaybackClock<S>>> {
        &self.clock
    }

    /// The shared project
    pub fn project(&self) -> &SharedProject {
        &self.project
    }

    /// Time between frame callbacks
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Start the clock, bounded by the project's current duration
    pub fn play(&self) -> PlaybackTicket {
        let duration = self.project.read(|p| p.duration);
        let mut clock = self.clock.lock();
        clock.set_duration(duration);
        clock.play()
    }

    /// Run the frame loop for `ticket` until playback ends or is cancelled
    pub async fn run(&self, ticket: PlaybackTicket, sink: &mut impl FrameSink) -> PlaybackOutcome {
        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            // The clock stays locked until the sink returns, so a pause or
            // seek from another thread lands either before the sample or
            // after the frame is presented.
            let mut clock = self.clock.lock();
            clock.set_duration(self.project.read(|p| p.duration));
            let Some(sample) = clock.advance(ticket) else {
                tracing::debug!("Frame loop superseded");
                return PlaybackOutcome::Cancelled;
            };

            self.project.read(|project| {
                let frame = frame_at(project, sample.time);
                sink.present(&frame);
            });

            if sample.finished {
                tracing::debug!(time = sample.time, "Frame loop finished");
                return PlaybackOutcome::Finished;
            }
        }
    }

    /// Start playback and run the frame loop on a tokio task
    pub fn spawn(&self, mut sink: impl FrameSink + 'static) -> JoinHandle<PlaybackOutcome> {
        let ticket = self.play();
        let driver = self.clone();
        tokio::spawn(async move { driver.run(ticket, &mut sink).await })
    }
}
