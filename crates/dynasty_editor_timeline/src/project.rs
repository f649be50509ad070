// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project holding the clips of an edit.
//!
//! All clip and keyframe edits go through [`Project`]. Edits addressed to an
//! unknown clip id are ignored: the UI can race a deletion against an edit
//! that is already in flight, and neither side should fail because of it.
//! Every edit that changes the project refreshes `updated_at`.

use crate::clip::{
    AnimatableProperty, Clip, ClipId, ClipKind, ClipUpdate, DEFAULT_CLIP_DURATION,
};
use crate::config::ProjectDefaults;
use crate::error::ProjectError;
use crate::keyframe::{Easing, Keyframe};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a project. Fresh ids are random UUIDs; any
/// non-empty string loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new random project ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<String> for ProjectId {
    type Error = String;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        if id.is_empty() {
            Err("project id must not be empty".to_string())
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output frame shape, stored as `"W:H"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AspectRatio {
    /// 9:16, vertical video
    #[default]
    Portrait,
    /// 16:9, widescreen
    Landscape,
    /// 1:1
    Square,
    /// 4:5, feed posts
    Feed,
}

impl AspectRatio {
    /// Get the label, e.g. `"9:16"`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
            Self::Square => "1:1",
            Self::Feed => "4:5",
        }
    }

    /// Get all supported ratios
    pub fn all() -> &'static [AspectRatio] {
        &[Self::Portrait, Self::Landscape, Self::Square, Self::Feed]
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.label().to_string()
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.label() == label)
            .ok_or_else(|| format!("unsupported aspect ratio: {label}"))
    }
}

/// An edit: clips on layers plus output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: ProjectId,
    /// Project name
    pub name: String,
    /// Clips in insertion order
    pub clips: Vec<Clip>,
    /// Project length in seconds; bounds playback
    pub duration: f64,
    /// Output frame shape
    pub aspect_ratio: AspectRatio,
    /// Frames per second
    pub fps: f64,
    /// Last modification time, RFC 3339
    pub updated_at: String,
    /// Preview image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Project {
    /// Create an empty project with default settings
    pub fn new(name: impl Into<String>) -> Self {
        let defaults = ProjectDefaults {
            name: name.into(),
            ..ProjectDefaults::default()
        };
        Self::from_defaults(&defaults)
    }

    /// Create an empty project from configured defaults
    pub fn from_defaults(defaults: &ProjectDefaults) -> Self {
        Self {
            id: ProjectId::new(),
            name: defaults.name.clone(),
            clips: Vec::new(),
            duration: defaults.duration,
            aspect_ratio: defaults.aspect_ratio,
            fps: defaults.fps,
            updated_at: chrono::Utc::now().to_rfc3339(),
            thumbnail: None,
        }
    }

    /// Refresh the modification time
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// Get a clip
    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == *id)
    }

    /// Get a mutable clip
    pub fn clip_mut(&mut self, id: &ClipId) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == *id)
    }

    /// Get clip count
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Add a default clip of `kind` starting at `start_time` on a new layer.
    ///
    /// `start_time` is normally the playhead; negative or non-finite values
    /// start the clip at 0.
    pub fn add_clip(&mut self, kind: ClipKind, start_time: f64) -> ClipId {
        let start_time = if start_time.is_finite() {
            start_time.max(0.0)
        } else {
            0.0
        };
        let layer = u32::try_from(self.clips.len()).unwrap_or(u32::MAX);
        let clip = Clip::new(kind, start_time, layer);
        let id = clip.id.clone();
        tracing::debug!(clip = %id, kind = kind.name(), start_time, layer, "Added clip");
        self.clips.push(clip);
        self.touch();
        id
    }

    /// Append a fully built clip, e.g. a suggested caption.
    ///
    /// Fails if the id is already taken or the clip would not survive a reload.
    pub fn insert_clip(&mut self, clip: Clip) -> Result<ClipId, ProjectError> {
        if self.clip(&clip.id).is_some() {
            return Err(ProjectError::DuplicateClipId(clip.id));
        }
        check_clip(&clip)?;
        let id = clip.id.clone();
        tracing::debug!(clip = %id, kind = clip.kind.name(), "Inserted clip");
        self.clips.push(clip);
        self.touch();
        Ok(id)
    }

    /// Merge a partial update into a clip. Returns false for an unknown id.
    pub fn update_clip(&mut self, id: &ClipId, update: ClipUpdate) -> bool {
        let Some(clip) = self.clip_mut(id) else {
            tracing::debug!(clip = %id, "Ignoring update for unknown clip");
            return false;
        };
        clip.apply(update);
        self.touch();
        true
    }

    /// Remove a clip. Callers holding a selection of `id` must drop it.
    pub fn delete_clip(&mut self, id: &ClipId) -> Option<Clip> {
        let Some(index) = self.clips.iter().position(|c| c.id == *id) else {
            tracing::debug!(clip = %id, "Ignoring delete of unknown clip");
            return None;
        };
        tracing::debug!(clip = %id, "Deleted clip");
        let clip = self.clips.remove(index);
        self.touch();
        Some(clip)
    }

    /// Key the current static value of `property` at clip-relative `time`.
    ///
    /// Times before the clip start key at 0. Returns false for an unknown clip
    /// or a non-finite time.
    pub fn add_keyframe(&mut self, clip_id: &ClipId, property: AnimatableProperty, time: f64) -> bool {
        let Some(clip) = self.clip_mut(clip_id) else {
            tracing::debug!(clip = %clip_id, %property, "Ignoring keyframe for unknown clip");
            return false;
        };
        let Some(value) = clip.add_keyframe(property, time) else {
            tracing::debug!(clip = %clip_id, %property, time, "Ignoring keyframe at non-finite time");
            return false;
        };
        tracing::debug!(clip = %clip_id, %property, time, value, "Added keyframe");
        self.touch();
        true
    }

    /// Remove keyframes of `property` within 0.05 s of `time` (inclusive).
    ///
    /// Returns how many were removed.
    pub fn remove_keyframe(
        &mut self,
        clip_id: &ClipId,
        property: AnimatableProperty,
        time: f64,
    ) -> usize {
        let Some(clip) = self.clip_mut(clip_id) else {
            tracing::debug!(clip = %clip_id, %property, "Ignoring keyframe removal for unknown clip");
            return 0;
        };
        let removed = clip.remove_keyframes_near(property, time);
        if removed > 0 {
            tracing::debug!(clip = %clip_id, %property, time, removed, "Removed keyframes");
            self.touch();
        }
        removed
    }

    /// Set the easing of keyframes of `property` within 0.05 s of `time`.
    ///
    /// Returns how many changed.
    pub fn update_keyframe_easing(
        &mut self,
        clip_id: &ClipId,
        property: AnimatableProperty,
        time: f64,
        easing: Easing,
    ) -> usize {
        let Some(clip) = self.clip_mut(clip_id) else {
            tracing::debug!(clip = %clip_id, %property, "Ignoring easing update for unknown clip");
            return 0;
        };
        let changed = clip.set_easing_near(property, time, easing);
        if changed > 0 {
            tracing::debug!(clip = %clip_id, %property, time, ?easing, changed, "Updated keyframe easing");
            self.touch();
        }
        changed
    }

    /// Set a property's static value, updating the keyframe at the playhead if any.
    ///
    /// Returns false for an unknown clip.
    pub fn set_property_value(
        &mut self,
        clip_id: &ClipId,
        property: AnimatableProperty,
        relative_time: f64,
        value: f64,
    ) -> bool {
        let Some(clip) = self.clip_mut(clip_id) else {
            tracing::debug!(clip = %clip_id, %property, "Ignoring value for unknown clip");
            return false;
        };
        clip.set_property_value(property, relative_time, value);
        self.touch();
        true
    }

    /// Restore a clip's default transform and drop its keyframes
    pub fn reset_transform(&mut self, clip_id: &ClipId) -> bool {
        let Some(clip) = self.clip_mut(clip_id) else {
            tracing::debug!(clip = %clip_id, "Ignoring transform reset for unknown clip");
            return false;
        };
        clip.reset_transform();
        tracing::debug!(clip = %clip_id, "Reset transform");
        self.touch();
        true
    }

    /// Keyframe of `property` near clip-relative `time`, if any
    pub fn keyframe_near(
        &self,
        clip_id: &ClipId,
        property: AnimatableProperty,
        time: f64,
    ) -> Option<&Keyframe> {
        self.clip(clip_id)?.keyframes.keyframe_near(property, time)
    }

    /// Clips on one layer, in insertion order
    pub fn clips_on_layer(&self, layer: u32) -> impl Iterator<Item = &Clip> + '_ {
        self.clips.iter().filter(move |c| c.layer == layer)
    }

    /// Number of layers in use (highest layer index + 1)
    pub fn layer_count(&self) -> u32 {
        self.clips.iter().map(|c| c.layer + 1).max().unwrap_or(0)
    }

    /// End of the last clip; may exceed `duration`
    pub fn content_duration(&self) -> f64 {
        self.clips.iter().map(Clip::end_time).fold(0.0, f64::max)
    }

    /// Convert time to frame number
    pub fn time_to_frame(&self, time: f64) -> u64 {
        (time.max(0.0) * self.fps).floor() as u64
    }

    /// Convert frame number to time
    pub fn frame_to_time(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<(), ProjectError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ProjectError::InvalidDuration(self.duration));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ProjectError::InvalidFrameRate(self.fps));
        }

        let mut seen = HashSet::new();
        for clip in &self.clips {
            if !seen.insert(&clip.id) {
                return Err(ProjectError::DuplicateClipId(clip.id.clone()));
            }
            check_clip(clip)?;
        }
        Ok(())
    }

    /// Fix structural problems in place. Returns the number of repairs made.
    pub fn repair(&mut self) -> usize {
        let defaults = ProjectDefaults::default();
        let mut repairs = 0;

        if !(self.duration.is_finite() && self.duration > 0.0) {
            tracing::warn!(duration = self.duration, "Resetting invalid project duration");
            self.duration = defaults.duration;
            repairs += 1;
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            tracing::warn!(fps = self.fps, "Resetting invalid frame rate");
            self.fps = defaults.fps;
            repairs += 1;
        }

        let mut seen = HashSet::new();
        for clip in &mut self.clips {
            if !seen.insert(clip.id.clone()) {
                let fresh = ClipId::new();
                tracing::warn!(clip = %clip.id, new_id = %fresh, "Reassigning duplicate clip id");
                seen.insert(fresh.clone());
                clip.id = fresh;
                repairs += 1;
            }
            if !(clip.start_time.is_finite() && clip.start_time >= 0.0) {
                tracing::warn!(clip = %clip.id, start_time = clip.start_time, "Clamping start time");
                clip.start_time = 0.0;
                repairs += 1;
            }
            if !(clip.duration.is_finite() && clip.duration > 0.0) {
                tracing::warn!(clip = %clip.id, duration = clip.duration, "Resetting clip duration");
                clip.duration = DEFAULT_CLIP_DURATION;
                repairs += 1;
            }
            for property in AnimatableProperty::ALL {
                for keyframe in clip.keyframes.get_mut(property).iter_mut() {
                    if !(keyframe.time.is_finite() && keyframe.time >= 0.0) {
                        tracing::warn!(clip = %clip.id, %property, time = keyframe.time, "Clamping keyframe time");
                        keyframe.time = 0.0;
                        repairs += 1;
                    }
                }
            }
            clip.keyframes.sort();
        }

        if repairs > 0 {
            self.touch();
        }
        repairs
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON and validate
    pub fn from_json(source: &str) -> Result<Self, ProjectError> {
        Self::checked(serde_json::from_str(source)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ProjectError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Parse from RON and validate
    pub fn from_ron(source: &str) -> Result<Self, ProjectError> {
        Self::checked(ron::from_str(source)?)
    }

    fn checked(mut project: Self) -> Result<Self, ProjectError> {
        project.validate()?;
        for clip in &mut project.clips {
            clip.keyframes.sort();
        }
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::from_defaults(&ProjectDefaults::default())
    }
}

/// Per-clip invariants: non-negative start, positive duration, keyframe times >= 0
fn check_clip(clip: &Clip) -> Result<(), ProjectError> {
    if !(clip.start_time.is_finite() && clip.start_time >= 0.0) {
        return Err(ProjectError::InvalidStartTime {
            id: clip.id.clone(),
            start_time: clip.start_time,
        });
    }
    if !(clip.duration.is_finite() && clip.duration > 0.0) {
        return Err(ProjectError::InvalidClipDuration {
            id: clip.id.clone(),
            duration: clip.duration,
        });
    }
    for (property, keyframes) in clip.keyframes.iter() {
        if let Some(bad) = keyframes
            .iter()
            .find(|k| !(k.time.is_finite() && k.time >= 0.0))
        {
            return Err(ProjectError::InvalidKeyframeTime {
                id: clip.id.clone(),
                property,
                time: bad.time,
            });
        }
    }
    Ok(())
}
