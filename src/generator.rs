use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use glam::{Mat2, Vec2};
use log::{debug, trace, warn};

use crate::changes::{ChangeQueue, ChangeRequest};
use crate::drawable::{BatchKey, BatchedDrawable, FrameOutput, OverlayVertex};
use crate::frame::FrameInfo;
use crate::identity::ShapeId;
use crate::shape::{FadeSpan, FadeState, ScreenShape};
use crate::snapshot::{ProjectedPoint, ProjectedPointStore};

/// Keeps a live set of world-anchored shapes and, once per frame, projects
/// them to screen space and emits batched drawable geometry. Overlays,
/// basically: markers, labels, callouts.
///
/// The generator is owned by the scene/render thread. Mutations arrive as
/// [`ChangeRequest`]s drained from a [`ChangeQueue`] between frames; the
/// only piece shared across threads is the projected-point store, reachable
/// through [`ScreenSpaceGenerator::projected_point_store`].
pub struct ScreenSpaceGenerator {
    name: String,
    /// Frame rectangle expansion: shapes whose anchor lands within this
    /// margin outside the viewport still produce geometry.
    margin: Vec2,
    /// Live shape set, identity-ordered for deterministic iteration.
    shapes: BTreeMap<ShapeId, ScreenShape>,
    projected: ProjectedPointStore,
}

impl ScreenSpaceGenerator {
    pub fn new(name: impl Into<String>, margin: Vec2) -> Self {
        ScreenSpaceGenerator {
            name: name.into(),
            margin,
            shapes: BTreeMap::new(),
            projected: ProjectedPointStore::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Insert shapes, taking ownership. A shape whose id is already present
    /// is dropped: the stored shape wins and callers must remove before
    /// re-adding.
    pub fn add_shapes(&mut self, shapes: Vec<ScreenShape>) {
        for shape in shapes {
            match self.shapes.entry(shape.id) {
                Entry::Occupied(_) => {
                    warn!("{}: duplicate add of {} ignored", self.name, shape.id);
                }
                Entry::Vacant(slot) => {
                    slot.insert(shape);
                }
            }
        }
    }

    pub fn add_shape(&mut self, shape: ScreenShape) {
        self.add_shapes(vec![shape]);
    }

    /// Remove by id; unknown ids are ignored.
    pub fn remove_shape(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_none() {
            trace!("{}: remove of unknown {} ignored", self.name, id);
        }
    }

    pub fn remove_shapes(&mut self, ids: &[ShapeId]) {
        for &id in ids {
            self.remove_shape(id);
        }
    }

    /// Replace the fade window on each matching shape; unknown ids are
    /// ignored. An ill-ordered window (fade-up ending after fade-down
    /// begins) is dropped whole rather than faulting the render thread.
    pub fn set_fade(
        &mut self,
        ids: &[ShapeId],
        fade_up: Option<FadeSpan>,
        fade_down: Option<FadeSpan>,
    ) {
        if let (Some(up), Some(down)) = (fade_up, fade_down) {
            if up.end() > down.start() {
                warn!(
                    "{}: fade window ignored, fade-up ends at {} after fade-down begins at {}",
                    self.name,
                    up.end(),
                    down.start()
                );
                return;
            }
        }
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.set_fade(fade_up, fade_down);
            }
        }
    }

    /// Read-only lookup, for change-execution code that inspects a shape
    /// before mutating it.
    pub fn shape(&self, id: ShapeId) -> Option<&ScreenShape> {
        self.shapes.get(&id)
    }

    /// Apply one change request. Must run on the owning thread, serialized
    /// against the frame pass.
    pub fn apply(&mut self, request: ChangeRequest) {
        match request {
            ChangeRequest::AddShapes(shapes) => {
                debug!("{}: adding {} shape(s)", self.name, shapes.len());
                self.add_shapes(shapes);
            }
            ChangeRequest::RemoveShapes(ids) => {
                debug!("{}: removing {} shape(s)", self.name, ids.len());
                self.remove_shapes(&ids);
            }
            ChangeRequest::FadeShapes {
                ids,
                fade_up,
                fade_down,
            } => {
                self.set_fade(&ids, fade_up, fade_down);
            }
        }
    }

    /// Drain every pending request from `queue` and apply them in
    /// submission order. Returns the number applied.
    pub fn drain(&mut self, queue: &ChangeQueue) -> usize {
        let requests = queue.drain();
        let count = requests.len();
        for request in requests {
            self.apply(request);
        }
        count
    }

    /// Handle shared with selection/hit-testing code on other threads.
    pub fn projected_point_store(&self) -> ProjectedPointStore {
        self.projected.clone()
    }

    /// Copy of the last published projected-point sequence.
    pub fn projected_points(&self) -> Vec<ProjectedPoint> {
        self.projected.snapshot()
    }

    /// The per-frame pass. For every shape: fade expiry, height culling,
    /// fade opacity, world-to-screen projection, frame-bounds test against
    /// the margin-expanded viewport, then geometry emission into per-key
    /// batches. Publishes a fresh projected-point snapshot and removes
    /// shapes whose fade-down fully elapsed.
    pub fn generate_drawables(&mut self, frame: &FrameInfo) -> FrameOutput {
        let frame_mbr = frame.frame_mbr().expanded_by(self.margin);
        let mut batches: BTreeMap<BatchKey, BatchedDrawable> = BTreeMap::new();
        let mut points = Vec::with_capacity(self.shapes.len());
        let mut expired = Vec::new();

        for shape in self.shapes.values() {
            // Expiry is unconditional: a shape whose fade-down has fully
            // elapsed leaves the set this frame even while height-culled.
            let state = shape.fade_state(frame.current_time);
            if state == FadeState::Expired {
                expired.push(shape.id);
                continue;
            }

            if !shape.visible_at_height(frame.height_above_surface) {
                continue;
            }

            let FadeState::Visible(alpha) = state else {
                // Hidden: not yet visible, nothing to track.
                continue;
            };

            let Some(base) = frame.project(shape.world_loc) else {
                points.push(ProjectedPoint {
                    id: shape.id,
                    screen_loc: None,
                });
                continue;
            };
            let screen_loc = base + shape.offset;

            if !frame_mbr.contains(screen_loc) {
                points.push(ProjectedPoint {
                    id: shape.id,
                    screen_loc: None,
                });
                continue;
            }
            points.push(ProjectedPoint {
                id: shape.id,
                screen_loc: Some(screen_loc),
            });

            if alpha <= 0.0 {
                continue;
            }

            // Screen y points down, so a positive angle from Mat2 comes out
            // clockwise on screen; north-relative rotation minus the camera
            // heading gives the effective screen angle.
            let rotation = shape
                .rotation
                .map(|angle| Mat2::from_angle(angle - frame.heading));

            for geom in &shape.geometry {
                if geom.coords().is_empty() {
                    continue;
                }
                let key = BatchKey {
                    draw_priority: shape.draw_priority,
                    texture: geom.texture(),
                };
                let batch = batches
                    .entry(key)
                    .or_insert_with(|| BatchedDrawable::new(key));
                let color = geom.color().with_alpha_scaled(alpha);
                let vertices: Vec<OverlayVertex> = geom
                    .coords()
                    .iter()
                    .zip(geom.tex_coords())
                    .map(|(&coord, &tex_coord)| {
                        let local = match rotation {
                            Some(m) => m * coord,
                            None => coord,
                        };
                        OverlayVertex {
                            position: (screen_loc + local).to_array(),
                            tex_coord: tex_coord.to_array(),
                            color,
                        }
                    })
                    .collect();
                batch.push_convex(&vertices);
            }
        }

        for id in &expired {
            trace!("{}: {} fully faded, expiring", self.name, id);
            self.shapes.remove(id);
        }

        self.projected.publish(points);

        FrameOutput {
            drawables: Vec::new(),
            screen_drawables: batches
                .into_values()
                .filter(|batch| !batch.is_empty())
                .collect(),
        }
    }
}
