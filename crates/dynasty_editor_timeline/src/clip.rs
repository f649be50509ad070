// SPDX-License-Identifier: MIT OR Apache-2.0
//! Clip definitions for the timeline.

use crate::keyframe::{clamp_keyframe_time, sort_keyframes, Easing, Keyframe};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default length of a newly added clip, in seconds
pub const DEFAULT_CLIP_DURATION: f64 = 5.0;

/// Source assigned to freshly added video clips until the user picks media
pub const SAMPLE_VIDEO_URL: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-girl-in-neon-light-1282-large.mp4";

/// Unique identifier for a clip.
///
/// Fresh ids are random UUIDs. Any non-empty string is accepted on load, so
/// projects keyed by shorter generated ids keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClipId(String);

impl ClipId {
    /// Create a new random clip ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<String> for ClipId {
    type Error = String;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        if id.is_empty() {
            Err("clip id must not be empty".to_string())
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ClipId> for String {
    fn from(id: ClipId) -> Self {
        id.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of media a clip carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    /// Video footage
    Video,
    /// Audio only
    Audio,
    /// Text overlay (captions, titles)
    Text,
    /// Still image
    Image,
}

impl ClipKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

/// Transform property that can carry keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimatableProperty {
    /// Horizontal offset
    X,
    /// Vertical offset
    Y,
    /// Uniform scale factor
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Opacity in `[0, 1]`
    Opacity,
}

impl AnimatableProperty {
    /// Every animatable property, in inspector order
    pub const ALL: [AnimatableProperty; 5] = [
        Self::X,
        Self::Y,
        Self::Scale,
        Self::Rotation,
        Self::Opacity,
    ];

    /// Get the property name
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
        }
    }
}

impl fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static (rest) transform of a clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal offset in pixels
    pub x: f64,
    /// Vertical offset in pixels
    pub y: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Transform {
    /// Read a single property
    pub fn get(&self, property: AnimatableProperty) -> f64 {
        match property {
            AnimatableProperty::X => self.x,
            AnimatableProperty::Y => self.y,
            AnimatableProperty::Scale => self.scale,
            AnimatableProperty::Rotation => self.rotation,
            AnimatableProperty::Opacity => self.opacity,
        }
    }

    /// Write a single property
    pub fn set(&mut self, property: AnimatableProperty, value: f64) {
        let slot = match property {
            AnimatableProperty::X => &mut self.x,
            AnimatableProperty::Y => &mut self.y,
            AnimatableProperty::Scale => &mut self.scale,
            AnimatableProperty::Rotation => &mut self.rotation,
            AnimatableProperty::Opacity => &mut self.opacity,
        };
        *slot = value;
    }
}

/// Static color grading of a clip (percentages for the first four, offsets for the rest)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorGrading {
    /// Brightness percentage
    pub brightness: f64,
    /// Contrast percentage
    pub contrast: f64,
    /// Saturation percentage
    pub saturation: f64,
    /// Vibrance percentage
    pub vibrance: f64,
    /// Exposure offset
    pub exposure: f64,
    /// Highlights offset
    pub highlights: f64,
    /// Shadows offset
    pub shadows: f64,
    /// White balance temperature offset
    pub temperature: f64,
    /// White balance tint offset
    pub tint: f64,
}

impl Default for ColorGrading {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            vibrance: 100.0,
            exposure: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            temperature: 0.0,
            tint: 0.0,
        }
    }
}

/// Per-property keyframe lists of a clip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipKeyframes {
    /// Keyframes for `x`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<Keyframe>,
    /// Keyframes for `y`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<Keyframe>,
    /// Keyframes for `scale`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scale: Vec<Keyframe>,
    /// Keyframes for `rotation`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rotation: Vec<Keyframe>,
    /// Keyframes for `opacity`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opacity: Vec<Keyframe>,
}

impl ClipKeyframes {
    /// Keyframes of one property
    pub fn get(&self, property: AnimatableProperty) -> &[Keyframe] {
        match property {
            AnimatableProperty::X => &self.x,
            AnimatableProperty::Y => &self.y,
            AnimatableProperty::Scale => &self.scale,
            AnimatableProperty::Rotation => &self.rotation,
            AnimatableProperty::Opacity => &self.opacity,
        }
    }

    /// Mutable keyframes of one property
    pub fn get_mut(&mut self, property: AnimatableProperty) -> &mut Vec<Keyframe> {
        match property {
            AnimatableProperty::X => &mut self.x,
            AnimatableProperty::Y => &mut self.y,
            AnimatableProperty::Scale => &mut self.scale,
            AnimatableProperty::Rotation => &mut self.rotation,
            AnimatableProperty::Opacity => &mut self.opacity,
        }
    }

    /// Insert a keyframe and keep the property's list time-sorted
    pub fn insert(&mut self, property: AnimatableProperty, keyframe: Keyframe) {
        let keyframes = self.get_mut(property);
        keyframes.push(keyframe);
        sort_keyframes(keyframes);
    }

    /// Re-sort every property's list by time
    pub fn sort(&mut self) {
        for property in AnimatableProperty::ALL {
            sort_keyframes(self.get_mut(property));
        }
    }

    /// Clamp negative keyframe times to 0, drop non-finite ones and re-sort.
    ///
    /// Returns how many keyframes were dropped.
    pub fn sanitize(&mut self) -> usize {
        let mut dropped = 0;
        for property in AnimatableProperty::ALL {
            let keyframes = self.get_mut(property);
            let before = keyframes.len();
            keyframes.retain_mut(|k| match clamp_keyframe_time(k.time) {
                Some(time) => {
                    k.time = time;
                    true
                }
                None => false,
            });
            dropped += before - keyframes.len();
            sort_keyframes(keyframes);
        }
        dropped
    }

    /// First keyframe strictly inside the tolerance band around `time`
    pub fn keyframe_near(&self, property: AnimatableProperty, time: f64) -> Option<&Keyframe> {
        self.get(property).iter().find(|k| k.is_near(time))
    }

    /// Iterate over `(property, keyframes)` for every property
    pub fn iter(&self) -> impl Iterator<Item = (AnimatableProperty, &[Keyframe])> + '_ {
        AnimatableProperty::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Total keyframe count across all properties
    pub fn count(&self) -> usize {
        self.iter().map(|(_, k)| k.len()).sum()
    }

    /// Whether no property has keyframes
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Drop all keyframes
    pub fn clear(&mut self) {
        for property in AnimatableProperty::ALL {
            self.get_mut(property).clear();
        }
    }
}

/// A timed piece of media placed on a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Media kind
    #[serde(rename = "type")]
    pub kind: ClipKind,
    /// Display name
    pub name: String,
    /// Start on the project timeline, in seconds
    pub start_time: f64,
    /// Length in seconds
    pub duration: f64,
    /// Media location (empty for text clips)
    #[serde(default)]
    pub source_url: String,
    /// Track index used for stacking
    pub layer: u32,
    /// Static transform, used where a property has no keyframes
    pub transform: Transform,
    /// Static color grading
    pub color_grading: ColorGrading,
    /// Keyframes per animatable property
    #[serde(default)]
    pub keyframes: ClipKeyframes,
    /// Applied effect identifiers
    #[serde(default)]
    pub effects: Vec<String>,
}

impl Clip {
    /// Create a clip with default transform, grading and length
    pub fn new(kind: ClipKind, start_time: f64, layer: u32) -> Self {
        let source_url = match kind {
            ClipKind::Video => SAMPLE_VIDEO_URL.to_string(),
            ClipKind::Audio | ClipKind::Text | ClipKind::Image => String::new(),
        };

        Self {
            id: ClipId::new(),
            kind,
            name: format!("New {}", kind.name()),
            start_time,
            duration: DEFAULT_CLIP_DURATION,
            source_url,
            layer,
            transform: Transform::default(),
            color_grading: ColorGrading::default(),
            keyframes: ClipKeyframes::default(),
            effects: Vec::new(),
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// End of the visible window
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether the clip is on screen at a global time. Both ends are inclusive.
    pub fn is_visible_at(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time()
    }

    /// Convert a global time to this clip's keyframe time basis
    pub fn relative_time(&self, global_time: f64) -> f64 {
        global_time - self.start_time
    }

    /// Merge a partial update into this clip.
    ///
    /// Negative start times are clamped to 0. Non-finite start times and
    /// non-positive durations are ignored, and incoming keyframes are
    /// sanitized, so the clip stays loadable.
    pub fn apply(&mut self, update: ClipUpdate) {
        let ClipUpdate {
            kind,
            name,
            start_time,
            duration,
            source_url,
            layer,
            transform,
            color_grading,
            keyframes,
            effects,
        } = update;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(start_time) = start_time {
            if start_time.is_finite() {
                self.start_time = start_time.max(0.0);
            } else {
                tracing::debug!(clip = %self.id, start_time, "Ignoring non-finite start time");
            }
        }
        if let Some(duration) = duration {
            if duration.is_finite() && duration > 0.0 {
                self.duration = duration;
            } else {
                tracing::debug!(clip = %self.id, duration, "Ignoring invalid clip duration");
            }
        }
        if let Some(source_url) = source_url {
            self.source_url = source_url;
        }
        if let Some(layer) = layer {
            self.layer = layer;
        }
        if let Some(transform) = transform {
            self.transform = transform;
        }
        if let Some(color_grading) = color_grading {
            self.color_grading = color_grading;
        }
        if let Some(mut keyframes) = keyframes {
            let dropped = keyframes.sanitize();
            if dropped > 0 {
                tracing::debug!(clip = %self.id, dropped, "Dropped keyframes with non-finite times");
            }
            self.keyframes = keyframes;
        }
        if let Some(effects) = effects {
            self.effects = effects;
        }
    }

    /// Add a keyframe at `time` holding the current static value of `property`.
    ///
    /// A playhead before the clip start keys at 0. Returns the keyed value,
    /// or `None` if `time` is not finite.
    pub fn add_keyframe(&mut self, property: AnimatableProperty, time: f64) -> Option<f64> {
        let time = clamp_keyframe_time(time)?;
        let value = self.transform.get(property);
        self.keyframes.insert(property, Keyframe::new(time, value));
        Some(value)
    }

    /// Remove every keyframe of `property` within the tolerance band (inclusive).
    ///
    /// Returns how many keyframes were removed.
    pub fn remove_keyframes_near(&mut self, property: AnimatableProperty, time: f64) -> usize {
        let keyframes = self.keyframes.get_mut(property);
        let before = keyframes.len();
        keyframes.retain(|k| !k.is_within_tolerance(time));
        before - keyframes.len()
    }

    /// Set the easing of keyframes of `property` strictly inside the tolerance band.
    ///
    /// Returns how many keyframes changed.
    pub fn set_easing_near(
        &mut self,
        property: AnimatableProperty,
        time: f64,
        easing: Easing,
    ) -> usize {
        let mut changed = 0;
        for keyframe in self.keyframes.get_mut(property).iter_mut() {
            if keyframe.is_near(time) {
                keyframe.easing = easing;
                changed += 1;
            }
        }
        changed
    }

    /// Set the static value of `property` and, if a keyframe sits at
    /// `relative_time`, that keyframe's value too.
    ///
    /// Returns true if a keyframe was updated.
    pub fn set_property_value(
        &mut self,
        property: AnimatableProperty,
        relative_time: f64,
        value: f64,
    ) -> bool {
        self.transform.set(property, value);
        match self
            .keyframes
            .get_mut(property)
            .iter_mut()
            .find(|k| k.is_near(relative_time))
        {
            Some(keyframe) => {
                keyframe.value = value;
                true
            }
            None => false,
        }
    }

    /// Restore the default transform and drop all keyframes
    pub fn reset_transform(&mut self) {
        self.transform = Transform::default();
        self.keyframes.clear();
    }
}

/// Partial clip update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipUpdate {
    /// New media kind
    #[serde(rename = "type")]
    pub kind: Option<ClipKind>,
    /// New name
    pub name: Option<String>,
    /// New start time
    pub start_time: Option<f64>,
    /// New duration
    pub duration: Option<f64>,
    /// New media location
    pub source_url: Option<String>,
    /// New layer
    pub layer: Option<u32>,
    /// New static transform
    pub transform: Option<Transform>,
    /// New color grading
    pub color_grading: Option<ColorGrading>,
    /// Replacement keyframe record
    pub keyframes: Option<ClipKeyframes>,
    /// Replacement effect list
    pub effects: Option<Vec<String>>,
}

impl ClipUpdate {
    /// Empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the start time
    pub fn start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the duration
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the media location
    pub fn source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// Set the layer
    pub fn layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Set the static transform
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Set the color grading
    pub fn color_grading(mut self, color_grading: ColorGrading) -> Self {
        self.color_grading = Some(color_grading);
        self
    }

    /// Replace the keyframe record
    pub fn keyframes(mut self, keyframes: ClipKeyframes) -> Self {
        self.keyframes = Some(keyframes);
        self
    }

    /// Replace the effect list
    pub fn effects(mut self, effects: Vec<String>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Whether this update changes anything
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clip_defaults() {
        let clip = Clip::new(ClipKind::Video, 1.5, 2);
        assert_eq!(clip.name, "New video");
        assert_eq!(clip.duration, DEFAULT_CLIP_DURATION);
        assert_eq!(clip.layer, 2);
        assert_eq!(clip.source_url, SAMPLE_VIDEO_URL);
        assert_eq!(clip.transform, Transform::default());
        assert!(clip.keyframes.is_empty());
        assert!(clip.effects.is_empty());

        let text = Clip::new(ClipKind::Text, 0.0, 0);
        assert!(text.source_url.is_empty());
    }

    #[test]
    fn test_visibility_is_inclusive() {
        let clip = Clip::new(ClipKind::Image, 2.0, 0).with_duration(3.0);
        assert!(clip.is_visible_at(2.0));
        assert!(clip.is_visible_at(5.0));
        assert!(!clip.is_visible_at(1.999));
        assert!(!clip.is_visible_at(5.001));
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        clip.transform.x = 10.0;
        clip.add_keyframe(AnimatableProperty::X, 3.0);
        clip.transform.x = 20.0;
        clip.add_keyframe(AnimatableProperty::X, 1.0);

        let times: Vec<f64> = clip.keyframes.x.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 3.0]);
        assert_eq!(clip.keyframes.x[0].value, 20.0);
        assert_eq!(clip.keyframes.x[1].value, 10.0);
    }

    #[test]
    fn test_keyframe_before_clip_start_keys_at_zero() {
        let mut clip = Clip::new(ClipKind::Video, 5.0, 0);
        clip.transform.opacity = 0.4;

        assert_eq!(clip.add_keyframe(AnimatableProperty::Opacity, -1.0), Some(0.4));
        assert_eq!(clip.keyframes.opacity[0].time, 0.0);

        assert_eq!(clip.add_keyframe(AnimatableProperty::Opacity, f64::NAN), None);
        assert_eq!(clip.keyframes.opacity.len(), 1);
    }

    #[test]
    fn test_remove_keyframes_within_band() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        clip.add_keyframe(AnimatableProperty::Opacity, 1.0);

        assert_eq!(clip.remove_keyframes_near(AnimatableProperty::Opacity, 1.06), 0);
        assert_eq!(clip.keyframes.opacity.len(), 1);
        assert_eq!(clip.remove_keyframes_near(AnimatableProperty::Opacity, 1.04), 1);
        assert!(clip.keyframes.opacity.is_empty());
    }

    #[test]
    fn test_easing_update_only_touches_band() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        clip.add_keyframe(AnimatableProperty::Scale, 0.0);
        clip.add_keyframe(AnimatableProperty::Scale, 2.0);

        let changed = clip.set_easing_near(AnimatableProperty::Scale, 2.03, Easing::EaseOut);
        assert_eq!(changed, 1);
        assert_eq!(clip.keyframes.scale[0].easing, Easing::Linear);
        assert_eq!(clip.keyframes.scale[1].easing, Easing::EaseOut);
    }

    #[test]
    fn test_set_property_value_updates_keyframe_at_playhead() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        clip.add_keyframe(AnimatableProperty::Rotation, 1.0);

        assert!(clip.set_property_value(AnimatableProperty::Rotation, 1.01, 45.0));
        assert_eq!(clip.transform.rotation, 45.0);
        assert_eq!(clip.keyframes.rotation[0].value, 45.0);

        assert!(!clip.set_property_value(AnimatableProperty::Rotation, 3.0, 90.0));
        assert_eq!(clip.transform.rotation, 90.0);
        assert_eq!(clip.keyframes.rotation[0].value, 45.0);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        let original_grading = clip.color_grading;

        clip.apply(ClipUpdate::new().name("Caption").start_time(4.0));

        assert_eq!(clip.name, "Caption");
        assert_eq!(clip.start_time, 4.0);
        assert_eq!(clip.duration, DEFAULT_CLIP_DURATION);
        assert_eq!(clip.color_grading, original_grading);
    }

    #[test]
    fn test_apply_keeps_clip_window_valid() {
        let mut clip = Clip::new(ClipKind::Video, 2.0, 0);

        clip.apply(ClipUpdate::new().duration(0.0).start_time(-3.0));
        assert_eq!(clip.start_time, 0.0);
        assert_eq!(clip.duration, DEFAULT_CLIP_DURATION);

        clip.apply(ClipUpdate::new().duration(f64::INFINITY).start_time(f64::NAN));
        assert_eq!(clip.start_time, 0.0);
        assert_eq!(clip.duration, DEFAULT_CLIP_DURATION);

        clip.apply(ClipUpdate::new().duration(-1.0));
        assert_eq!(clip.duration, DEFAULT_CLIP_DURATION);
    }

    #[test]
    fn test_apply_sanitizes_keyframes() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        let keyframes = ClipKeyframes {
            x: vec![
                Keyframe::new(2.0, 20.0),
                Keyframe::new(-0.5, 5.0),
                Keyframe::new(f64::NAN, 99.0),
            ],
            ..ClipKeyframes::default()
        };

        clip.apply(ClipUpdate::new().keyframes(keyframes));

        let times: Vec<f64> = clip.keyframes.x.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 2.0]);
        assert_eq!(clip.keyframes.x[0].value, 5.0);
    }

    #[test]
    fn test_clip_id_accepts_any_non_empty_string() {
        let id: ClipId = serde_json::from_str("\"a8f2k1z9q\"").unwrap();
        assert_eq!(id.as_str(), "a8f2k1z9q");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a8f2k1z9q\"");
        assert!(serde_json::from_str::<ClipId>("\"\"").is_err());
        assert_ne!(ClipId::new(), ClipId::new());
    }

    #[test]
    fn test_reset_transform() {
        let mut clip = Clip::new(ClipKind::Text, 0.0, 0);
        clip.set_property_value(AnimatableProperty::Scale, 0.0, 3.0);
        clip.add_keyframe(AnimatableProperty::Scale, 0.5);

        clip.reset_transform();

        assert_eq!(clip.transform, Transform::default());
        assert!(clip.keyframes.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut clip = Clip::new(ClipKind::Audio, 1.0, 0);
        clip.add_keyframe(AnimatableProperty::Opacity, 0.0);
        let json = serde_json::to_value(&clip).unwrap();

        assert_eq!(json["type"], "audio");
        assert_eq!(json["startTime"], 1.0);
        assert!(json["colorGrading"].is_object());
        assert!(json["keyframes"]["opacity"].is_array());
        assert!(json["keyframes"].get("x").is_none());
    }

    #[test]
    fn test_update_from_json() {
        let update: ClipUpdate =
            serde_json::from_str(r#"{"colorGrading":{"brightness":110,"contrast":95,"saturation":120,"vibrance":100,"exposure":5,"highlights":-10,"shadows":10,"temperature":15,"tint":0}}"#)
                .unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.color_grading.map(|g| g.brightness), Some(110.0));
        assert!(update.name.is_none());
    }
}
