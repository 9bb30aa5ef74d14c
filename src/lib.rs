//! Screen-space overlay generation for an interactive map rendering engine.
//!
//! The generator keeps a live set of world-anchored shapes (markers, labels,
//! callouts) and, once per rendered frame, projects each into 2D screen
//! space, applies height culling and fade opacity, and emits batched
//! drawable geometry grouped by texture and draw priority. A mutex-guarded
//! snapshot of the last frame's projected anchor positions is published for
//! hit-testing from other threads.
//!
//! Threading model: one scene/render thread owns a [`ScreenSpaceGenerator`]
//! and runs [`ScreenSpaceGenerator::generate_drawables`] once per frame.
//! Other threads submit [`ChangeRequest`]s through a [`ChangeSender`]; the
//! render thread drains them between frames. The projected-point store is
//! the only structure shared across threads.
//!
//! ```
//! use glam::{Mat4, Vec2, Vec3};
//! use screenspace::{
//!     ChangeRequest, FrameInfo, Rgba, ScreenShape, ScreenSpaceGenerator, ShapeGeometry,
//! };
//!
//! let mut generator = ScreenSpaceGenerator::new("markers", Vec2::new(64.0, 64.0));
//! let (sender, queue) = screenspace::change_queue();
//!
//! let mut marker = ScreenShape::new(Vec3::new(120.0, 80.0, 0.0));
//! marker.geometry.push(ShapeGeometry::untextured(
//!     Rgba::WHITE,
//!     vec![
//!         Vec2::new(-4.0, -4.0),
//!         Vec2::new(4.0, -4.0),
//!         Vec2::new(4.0, 4.0),
//!         Vec2::new(-4.0, 4.0),
//!     ],
//! ));
//! sender.submit(ChangeRequest::add(marker));
//!
//! // Once per frame, on the render thread:
//! generator.drain(&queue);
//! let frame = FrameInfo {
//!     view_proj: Mat4::orthographic_rh(0.0, 800.0, 600.0, 0.0, -1.0, 1.0),
//!     frame_size: Vec2::new(800.0, 600.0),
//!     current_time: 0.0,
//!     height_above_surface: 0.0,
//!     heading: 0.0,
//! };
//! let output = generator.generate_drawables(&frame);
//! assert_eq!(output.screen_drawables.len(), 1);
//! ```

pub mod changes;
pub mod drawable;
pub mod frame;
pub mod generator;
pub mod identity;
pub mod shape;
pub mod snapshot;

pub use changes::{change_queue, ChangeQueue, ChangeRequest, ChangeSender};
pub use drawable::{BatchKey, BatchedDrawable, FrameOutput, OverlayVertex};
pub use frame::{FrameInfo, Mbr};
pub use generator::ScreenSpaceGenerator;
pub use identity::{ShapeId, TextureId};
pub use shape::{FadeSpan, FadeState, Rgba, ScreenShape, ShapeGeometry};
pub use snapshot::{ProjectedPoint, ProjectedPointStore};
