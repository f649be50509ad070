// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types.

use crate::clip::{AnimatableProperty, ClipId};

/// Structural or serialization problem with a project
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Two clips share an id
    #[error("Duplicate clip id: {0}")]
    DuplicateClipId(ClipId),

    /// Clip duration is zero, negative or not finite
    #[error("Clip {id} has invalid duration {duration}")]
    InvalidClipDuration {
        /// Offending clip
        id: ClipId,
        /// Stored duration
        duration: f64,
    },

    /// Clip starts before the timeline origin
    #[error("Clip {id} has invalid start time {start_time}")]
    InvalidStartTime {
        /// Offending clip
        id: ClipId,
        /// Stored start time
        start_time: f64,
    },

    /// Keyframe time is negative or not finite
    #[error("Clip {id} has a {property} keyframe at invalid time {time}")]
    InvalidKeyframeTime {
        /// Owning clip
        id: ClipId,
        /// Animated property
        property: AnimatableProperty,
        /// Stored keyframe time
        time: f64,
    },

    /// Project duration is zero, negative or not finite
    #[error("Invalid project duration: {0}")]
    InvalidDuration(f64),

    /// Frame rate is zero, negative or not finite
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON decoding failed
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON encoding failed
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
}

/// Failure loading or saving engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RON decoding failed
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON encoding failed
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
}
