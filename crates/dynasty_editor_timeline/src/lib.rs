// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline and keyframe animation engine for the Dynasty video editor.
//!
//! This crate turns a project (clips on layers, each with keyframed
//! transform properties) into the resolved visual state of every visible clip
//! at a given time:
//! - Clip and project model with keyframe editing
//! - Curve evaluation with per-segment easing
//! - Per-clip transform resolution
//! - Per-frame compositing
//! - Playback clock and frame loop
//!
//! ## Architecture
//!
//! The engine is built on:
//! - Plain serde data types exchanged with persistence and AI collaborators
//! - Pure evaluation functions, safe to call every frame
//! - A small play/pause/seek state machine driven by a monotonic time source
//! - A shared project handle so edits and frames never interleave

pub mod clip;
pub mod compositor;
pub mod config;
pub mod driver;
pub mod error;
pub mod keyframe;
pub mod playback;
pub mod project;
pub mod resolve;
pub mod shared;

pub use clip::{
    AnimatableProperty, Clip, ClipId, ClipKeyframes, ClipKind, ClipUpdate, ColorGrading,
    Transform, DEFAULT_CLIP_DURATION,
};
pub use compositor::{frame_at, visible_clips, Frame, FrameLayer};
pub use config::{EngineConfig, ProjectDefaults, CONFIG_FILE_NAME};
pub use driver::{FrameSink, PlaybackDriver, PlaybackOutcome};
pub use error::{ConfigError, ProjectError};
pub use keyframe::{evaluate, Easing, Interpolation, Keyframe, KEYFRAME_TIME_TOLERANCE};
pub use playback::{
    ClockSample, ManualTimeSource, MonotonicTimeSource, PlaybackClock, PlaybackState,
    PlaybackTicket, TimeSource,
};
pub use project::{AspectRatio, Project, ProjectId};
pub use resolve::{resolve, resolve_property, ResolvedClip};
pub use shared::SharedProject;
