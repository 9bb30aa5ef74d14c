use glam::{Mat4, Vec2, Vec3};

/// Clip-space w below this is treated as degenerate and the point is
/// resolved to off-screen rather than propagating a fault.
const PROJECTION_W_EPSILON: f32 = 1e-6;

/// Per-frame view state handed in by the renderer. The generator only reads
/// it; camera math lives upstream.
#[derive(Copy, Clone, Debug)]
pub struct FrameInfo {
    /// World to clip space.
    pub view_proj: Mat4,
    /// Viewport size in pixels.
    pub frame_size: Vec2,
    /// Current frame time in seconds, on the same clock as fade timestamps.
    pub current_time: f64,
    /// Camera height used for min/max visibility culling.
    pub height_above_surface: f32,
    /// Camera heading in radians, clockwise from north.
    pub heading: f32,
}

impl FrameInfo {
    /// Project a world-space point to screen pixels (origin top-left,
    /// y down). Returns `None` for points behind the eye or when the
    /// transform is degenerate.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= PROJECTION_W_EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        if !ndc_x.is_finite() || !ndc_y.is_finite() {
            return None;
        }
        Some(Vec2::new(
            (ndc_x * 0.5 + 0.5) * self.frame_size.x,
            (1.0 - (ndc_y * 0.5 + 0.5)) * self.frame_size.y,
        ))
    }

    /// Visible screen rectangle in pixels.
    pub fn frame_mbr(&self) -> Mbr {
        Mbr::new(Vec2::ZERO, self.frame_size)
    }
}

/// Minimal 2D bounding rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mbr {
    pub ll: Vec2,
    pub ur: Vec2,
}

impl Mbr {
    pub fn new(ll: Vec2, ur: Vec2) -> Self {
        Mbr { ll, ur }
    }

    /// Grow the rectangle outward on every side.
    pub fn expanded_by(self, margin: Vec2) -> Mbr {
        Mbr {
            ll: self.ll - margin,
            ur: self.ur + margin,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.ll.x && p.x <= self.ur.x && p.y >= self.ll.y && p.y <= self.ur.y
    }
}
