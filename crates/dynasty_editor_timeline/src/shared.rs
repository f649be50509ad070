// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project handle shared between the edit API and the frame loop.
//!
//! Writers hold the lock for the whole edit, so a frame composited on another
//! thread sees either the project before the edit or after it.

use crate::project::Project;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, lock-protected project
#[derive(Debug, Clone, Default)]
pub struct SharedProject {
    inner: Arc<RwLock<Project>>,
}

impl SharedProject {
    /// Wrap a project
    pub fn new(project: Project) -> Self {
        Self {
            inner: Arc::new(RwLock::new(project)),
        }
    }

    /// Run `f` with shared access
    pub fn read<R>(&self, f: impl FnOnce(&Project) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access
    pub fn write<R>(&self, f: impl FnOnce(&mut Project) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Copy of the current project, e.g. for saving
    pub fn snapshot(&self) -> Project {
        self.inner.read().clone()
    }

    /// Swap in a new project, returning the old one
    pub fn replace(&self, project: Project) -> Project {
        std::mem::replace(&mut *self.inner.write(), project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipKind;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedProject::new(Project::new("Shared"));
        let other = shared.clone();

        let id = shared.write(|p| p.add_clip(ClipKind::Text, 0.0));
        assert!(other.read(|p| p.clip(&id).is_some()));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedProject::default();
        let snapshot = shared.snapshot();
        shared.write(|p| p.add_clip(ClipKind::Video, 0.0));

        assert_eq!(snapshot.clip_count(), 0);
        assert_eq!(shared.read(Project::clip_count), 1);
    }

    #[test]
    fn test_replace() {
        let shared = SharedProject::new(Project::new("Old"));
        let old = shared.replace(Project::new("New"));
        assert_eq!(old.name, "Old");
        assert_eq!(shared.read(|p| p.name.clone()), "New");
    }
}
