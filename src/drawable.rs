use bytemuck::{Pod, Zeroable};

use crate::identity::TextureId;

/// One vertex of batched overlay geometry. `repr(C)` + Pod so the consuming
/// renderer can upload the vertex buffer without repacking.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    /// Screen position in pixels, origin top-left.
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
    /// Fade-scaled RGBA.
    pub color: [f32; 4],
}

/// Batching key: geometry merges into one drawable only when both the
/// texture and the render state (draw priority) agree. The derived ordering
/// is the renderer submission order: lower priority first, so higher
/// priority batches draw later and land on top; texture id breaks ties
/// deterministically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchKey {
    pub draw_priority: i32,
    pub texture: Option<TextureId>,
}

/// Merged vertex/index buffers for every visible shape sharing one batch
/// key, rebuilt from scratch each frame.
#[derive(Clone, Debug)]
pub struct BatchedDrawable {
    pub key: BatchKey,
    pub vertices: Vec<OverlayVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl BatchedDrawable {
    pub fn new(key: BatchKey) -> Self {
        BatchedDrawable {
            key,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a convex polygon, fan-triangulated around its first vertex.
    /// Fewer than three vertices contribute nothing.
    pub(crate) fn push_convex(&mut self, verts: &[OverlayVertex]) {
        if verts.len() < 3 {
            return;
        }
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(verts);
        for i in 1..(verts.len() as u32 - 1) {
            self.indices.push(base);
            self.indices.push(base + i);
            self.indices.push(base + i + 1);
        }
    }
}

/// Everything one generator pass hands to the renderer. Screen drawables
/// are pure 2D geometry composited over the scene without depth testing;
/// the plain drawable class is reserved for depth-composited output and
/// stays empty for this generator.
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub drawables: Vec<BatchedDrawable>,
    pub screen_drawables: Vec<BatchedDrawable>,
}
