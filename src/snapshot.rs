use std::sync::{Arc, Mutex};

use glam::Vec2;

use crate::identity::ShapeId;

/// Last-frame screen location of one shape's anchor. `None` means the shape
/// projected off-screen (or degenerately) that frame and was culled from
/// drawing, but is still tracked for hit-testing continuity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub id: ShapeId,
    pub screen_loc: Option<Vec2>,
}

/// Mutex-guarded store of the last published frame's projected points.
///
/// The generator replaces the whole sequence at the end of each frame pass;
/// selection code on other threads clones the store handle and copies the
/// sequence out under the same lock. A reader therefore observes either the
/// complete previous frame or the complete new one, never a mix, and holds
/// the lock only for the duration of a copy.
#[derive(Clone, Default)]
pub struct ProjectedPointStore {
    points: Arc<Mutex<Vec<ProjectedPoint>>>,
}

impl ProjectedPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current sequence out. Lock, clone, unlock.
    pub fn snapshot(&self) -> Vec<ProjectedPoint> {
        self.points.lock().unwrap().clone()
    }

    /// Replace the stored sequence wholesale.
    pub(crate) fn publish(&self, points: Vec<ProjectedPoint>) {
        *self.points.lock().unwrap() = points;
    }
}
