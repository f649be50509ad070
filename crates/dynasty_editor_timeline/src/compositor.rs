// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame evaluation of a project.
//!
//! [`frame_at`] picks the clips whose window contains the playhead and
//! resolves each one. Layers come out in the project's clip order; stacking
//! is left to the renderer, with [`Frame::stacked`] as the usual policy.

use crate::clip::{Clip, ClipId, ColorGrading, Transform};
use crate::project::Project;
use crate::resolve::resolve;

/// One visible clip with its resolved state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayer<'a> {
    /// The clip being drawn
    pub clip: &'a Clip,
    /// Playhead time minus the clip's start
    pub relative_time: f64,
    /// Transform with keyframes applied
    pub transform: Transform,
    /// Color grading
    pub color_grading: ColorGrading,
}

/// Resolved state of every visible clip at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    /// Global time this frame was evaluated at
    pub time: f64,
    /// Visible clips, in project order
    pub layers: Vec<FrameLayer<'a>>,
}

impl<'a> Frame<'a> {
    /// Number of visible clips
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether nothing is visible
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate over visible clips in project order
    pub fn iter(&self) -> impl Iterator<Item = &FrameLayer<'a>> + '_ {
        self.layers.iter()
    }

    /// Find the layer for a clip
    pub fn layer(&self, id: &ClipId) -> Option<&FrameLayer<'a>> {
        self.layers.iter().find(|l| l.clip.id == *id)
    }

    /// Layers bottom to top: by layer index, then project order
    pub fn stacked(&self) -> Vec<&FrameLayer<'a>> {
        let mut stacked: Vec<_> = self.layers.iter().collect();
        stacked.sort_by_key(|l| l.clip.layer);
        stacked
    }
}

/// Clips visible at `time`, in project order
pub fn visible_clips(project: &Project, time: f64) -> impl Iterator<Item = &Clip> + '_ {
    project.clips.iter().filter(move |c| c.is_visible_at(time))
}

/// Evaluate the project at global `time`
pub fn frame_at(project: &Project, time: f64) -> Frame<'_> {
    let layers: Vec<FrameLayer<'_>> = visible_clips(project, time)
        .map(|clip| {
            let relative_time = clip.relative_time(time);
            let resolved = resolve(clip, relative_time);
            FrameLayer {
                clip,
                relative_time,
                transform: resolved.transform,
                color_grading: resolved.color_grading,
            }
        })
        .collect();

    tracing::trace!(time, visible = layers.len(), "Composited frame");

    Frame { time, layers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{ClipKind, ClipUpdate};
    use crate::keyframe::Keyframe;

    fn fade_in_project() -> (Project, ClipId) {
        let mut project = Project::default();
        project.duration = 10.0;
        let id = project.add_clip(ClipKind::Video, 2.0);
        project.update_clip(&id, ClipUpdate::new().duration(4.0));
        project.clip_mut(&id).unwrap().keyframes.opacity =
            vec![Keyframe::new(0.0, 0.0), Keyframe::new(4.0, 1.0)];
        (project, id)
    }

    #[test]
    fn test_fade_in_midpoint() {
        let (project, id) = fade_in_project();
        let frame = frame_at(&project, 4.0);

        assert_eq!(frame.len(), 1);
        let layer = frame.layer(&id).unwrap();
        assert_eq!(layer.relative_time, 2.0);
        assert_eq!(layer.transform.opacity, 0.5);
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        let (project, _) = fade_in_project();
        assert_eq!(frame_at(&project, 2.0).len(), 1);
        assert_eq!(frame_at(&project, 6.0).len(), 1);
        assert!(frame_at(&project, 1.999).is_empty());
        assert!(frame_at(&project, 6.001).is_empty());
    }

    #[test]
    fn test_preserves_project_order() {
        let mut project = Project::default();
        let top = project.add_clip(ClipKind::Text, 0.0);
        let bottom = project.add_clip(ClipKind::Video, 0.0);
        project.update_clip(&top, ClipUpdate::new().layer(5));
        project.update_clip(&bottom, ClipUpdate::new().layer(0));

        let frame = frame_at(&project, 1.0);
        let order: Vec<ClipId> = frame.iter().map(|l| l.clip.id.clone()).collect();
        assert_eq!(order, vec![top.clone(), bottom.clone()]);

        let stacked: Vec<ClipId> = frame.stacked().iter().map(|l| l.clip.id.clone()).collect();
        assert_eq!(stacked, vec![bottom, top]);
    }

    #[test]
    fn test_adjacent_clips_share_boundary() {
        let mut project = Project::default();
        let a = project.add_clip(ClipKind::Video, 0.0);
        let b = project.add_clip(ClipKind::Video, 5.0);

        let frame = frame_at(&project, 5.0);
        assert!(frame.layer(&a).is_some());
        assert!(frame.layer(&b).is_some());
    }

    #[test]
    fn test_clip_past_project_end_is_still_evaluated() {
        let mut project = Project::default();
        project.duration = 3.0;
        project.add_clip(ClipKind::Image, 2.0);

        assert_eq!(frame_at(&project, 6.5).len(), 1);
        assert_eq!(visible_clips(&project, 7.5).count(), 0);
    }
}
