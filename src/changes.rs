use std::sync::mpsc::{self, Receiver, Sender};

use crate::identity::ShapeId;
use crate::shape::{FadeSpan, ScreenShape};

/// A mutation of the live shape set. Requests are value messages applied in
/// submission order by the owning thread; they are consumed exactly once.
#[derive(Debug)]
pub enum ChangeRequest {
    /// Insert shapes, transferring ownership into the generator. An id
    /// already present is a no-op for that shape.
    AddShapes(Vec<ScreenShape>),
    /// Delete shapes by id; unknown ids are ignored.
    RemoveShapes(Vec<ShapeId>),
    /// Replace the fade window on shapes by id; unknown ids are ignored.
    FadeShapes {
        ids: Vec<ShapeId>,
        fade_up: Option<FadeSpan>,
        fade_down: Option<FadeSpan>,
    },
}

impl ChangeRequest {
    pub fn add(shape: ScreenShape) -> Self {
        ChangeRequest::AddShapes(vec![shape])
    }

    pub fn remove(id: ShapeId) -> Self {
        ChangeRequest::RemoveShapes(vec![id])
    }

    pub fn fade(id: ShapeId, fade_up: Option<FadeSpan>, fade_down: Option<FadeSpan>) -> Self {
        ChangeRequest::FadeShapes {
            ids: vec![id],
            fade_up,
            fade_down,
        }
    }
}

/// Producer half of the change queue; clone one per submitting thread.
/// Submission after the queue is gone is a silent no-op — the subsystem
/// never faults a producer.
#[derive(Clone)]
pub struct ChangeSender {
    tx: Sender<ChangeRequest>,
}

impl ChangeSender {
    pub fn submit(&self, request: ChangeRequest) {
        let _ = self.tx.send(request);
    }
}

/// Consumer half, owned by the render thread and drained between frames.
pub struct ChangeQueue {
    rx: Receiver<ChangeRequest>,
}

impl ChangeQueue {
    /// Take every pending request, in submission order, without blocking.
    pub fn drain(&self) -> Vec<ChangeRequest> {
        self.rx.try_iter().collect()
    }
}

/// Build a sender/queue pair for marshaling requests onto the render thread.
pub fn change_queue() -> (ChangeSender, ChangeQueue) {
    let (tx, rx) = mpsc::channel();
    (ChangeSender { tx }, ChangeQueue { rx })
}
