// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and curve evaluation.
//!
//! A property curve is a time-sorted list of [`Keyframe`]s. Between two
//! keyframes the value is interpolated linearly after the normalized position
//! has been remapped by the [`Easing`] of the segment's starting keyframe.
//! Outside the keyframe range the curve holds the nearest end value.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Band (in seconds) within which a query time addresses an existing keyframe.
///
/// Scrubbing rarely lands on the exact time a keyframe was authored at, so
/// removal and easing edits match anything this close.
pub const KEYFRAME_TIME_TOLERANCE: f64 = 0.05;

/// Easing curve between two keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic, starts slow
    EaseIn,
    /// Quadratic, ends slow
    EaseOut,
    /// Quadratic, slow at both ends
    EaseInOut,
}

impl Easing {
    /// Remap a normalized position `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    /// All easing kinds
    pub fn all() -> &'static [Easing] {
        &[Self::Linear, Self::EaseIn, Self::EaseOut, Self::EaseInOut]
    }
}

/// A control point of an animated property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds, relative to the owning clip's start
    pub time: f64,
    /// Property value at this keyframe
    pub value: f64,
    /// Easing of the segment that starts at this keyframe
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    /// Create a new linear keyframe
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    /// Set the easing of the outgoing segment
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Whether this keyframe lies inside the inclusive tolerance band around `time`
    pub fn is_within_tolerance(&self, time: f64) -> bool {
        (self.time - time).abs() <= KEYFRAME_TIME_TOLERANCE
    }

    /// Whether this keyframe lies strictly inside the tolerance band around `time`
    pub fn is_near(&self, time: f64) -> bool {
        (self.time - time).abs() < KEYFRAME_TIME_TOLERANCE
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two values
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }

    /// Interpolate across the segment `k1 -> k2` using `k1`'s easing.
    ///
    /// A zero-width segment resolves to `k2.value` (`t = 1`).
    pub fn segment(k1: &Keyframe, k2: &Keyframe, time: f64) -> f64 {
        let span = k2.time - k1.time;
        let t = if span > 0.0 {
            (time - k1.time) / span
        } else {
            1.0
        };
        Self::lerp(k1.value, k2.value, k1.easing.apply(t))
    }
}

/// Sort keyframes by time in place. Equal times keep their insertion order.
pub fn sort_keyframes(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// Map an authored keyframe time onto the clip's timeline.
///
/// Negative times clamp to 0. Non-finite times are rejected.
pub fn clamp_keyframe_time(time: f64) -> Option<f64> {
    time.is_finite().then(|| time.max(0.0))
}

/// Borrow `keyframes` if already time-sorted, otherwise return a sorted copy.
fn sorted_by_time(keyframes: &[Keyframe]) -> Cow<'_, [Keyframe]> {
    if keyframes.windows(2).all(|w| w[0].time <= w[1].time) {
        Cow::Borrowed(keyframes)
    } else {
        let mut sorted = keyframes.to_vec();
        sort_keyframes(&mut sorted);
        Cow::Owned(sorted)
    }
}

/// Evaluate a property curve at `time`.
///
/// Returns `fallback` when there are no keyframes. The input does not need
/// to be sorted and is never modified.
pub fn evaluate(keyframes: &[Keyframe], time: f64, fallback: f64) -> f64 {
    let sorted = sorted_by_time(keyframes);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return fallback;
    };

    if time <= first.time {
        return first.value;
    }
    if time >= last.time {
        return last.value;
    }

    sorted
        .windows(2)
        .find(|pair| pair[0].time <= time && time <= pair[1].time)
        .map_or(fallback, |pair| Interpolation::segment(&pair[0], &pair[1], time))
}
