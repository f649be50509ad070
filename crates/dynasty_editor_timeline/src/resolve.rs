// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolves a clip's animated properties at a point in time.

use crate::clip::{AnimatableProperty, Clip, ColorGrading, Transform};
use crate::keyframe;
use serde::{Deserialize, Serialize};

/// Fully resolved visual state of a clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedClip {
    /// Transform with keyframes applied
    pub transform: Transform,
    /// Color grading (static)
    pub color_grading: ColorGrading,
}

/// Evaluate one property of `clip` at clip-relative time.
///
/// Falls back to the clip's static transform value when the property has no
/// keyframes.
pub fn resolve_property(clip: &Clip, property: AnimatableProperty, relative_time: f64) -> f64 {
    keyframe::evaluate(
        clip.keyframes.get(property),
        relative_time,
        clip.transform.get(property),
    )
}

/// Resolve every animatable property of `clip` at clip-relative time.
///
/// Any `relative_time` is accepted; outside the keyframe range the curves
/// hold their end values.
pub fn resolve(clip: &Clip, relative_time: f64) -> ResolvedClip {
    let mut transform = clip.transform;
    for property in AnimatableProperty::ALL {
        transform.set(property, resolve_property(clip, property, relative_time));
    }

    ResolvedClip {
        transform,
        color_grading: clip.color_grading,
    }
}
