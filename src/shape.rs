use glam::{Vec2, Vec3};

use crate::identity::{ShapeId, TextureId};

/// RGBA color, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Float color with the alpha channel multiplied by a fade factor.
    /// This is what gets written into drawable vertex data.
    pub fn with_alpha_scaled(self, fade: f32) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0 * fade.clamp(0.0, 1.0),
        ]
    }
}

/// One convex piece of a shape's geometry: local pixel offsets around the
/// anchor, matching texture coordinates, one texture (or none) and a fill
/// color. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGeometry {
    texture: Option<TextureId>,
    color: Rgba,
    coords: Vec<Vec2>,
    tex_coords: Vec<Vec2>,
}

impl ShapeGeometry {
    /// Panics if `coords` and `tex_coords` differ in length; malformed
    /// geometry is a caller contract breach and must never reach the
    /// live shape set.
    pub fn new(
        texture: Option<TextureId>,
        color: Rgba,
        coords: Vec<Vec2>,
        tex_coords: Vec<Vec2>,
    ) -> Self {
        assert_eq!(
            coords.len(),
            tex_coords.len(),
            "shape geometry coords/tex_coords length mismatch"
        );
        ShapeGeometry {
            texture,
            color,
            coords,
            tex_coords,
        }
    }

    /// Untextured convex fill; texture coordinates are zeroed.
    pub fn untextured(color: Rgba, coords: Vec<Vec2>) -> Self {
        let tex_coords = vec![Vec2::ZERO; coords.len()];
        ShapeGeometry {
            texture: None,
            color,
            coords,
            tex_coords,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn coords(&self) -> &[Vec2] {
        &self.coords
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }
}

/// Absolute time span over which opacity ramps, `start <= end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeSpan {
    start: f64,
    end: f64,
}

impl FadeSpan {
    pub fn new(start: f64, end: f64) -> Self {
        assert!(start <= end, "fade span start must not exceed end");
        FadeSpan { start, end }
    }

    /// Instantaneous edge: fully there one side, fully gone the other.
    pub fn at(time: f64) -> Self {
        FadeSpan {
            start: time,
            end: time,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// 0 at `start` rising linearly to 1 at `end`, clamped outside.
    fn ramp_up(&self, time: f64) -> f32 {
        if self.end <= self.start {
            return if time >= self.end { 1.0 } else { 0.0 };
        }
        (((time - self.start) / (self.end - self.start)).clamp(0.0, 1.0)) as f32
    }
}

/// Frame-time visibility of a shape as derived from its fade window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FadeState {
    /// Before the fade-up span begins; not yet visible.
    Hidden,
    /// Visible with the given opacity in `[0, 1]`.
    Visible(f32),
    /// Fade-down has fully elapsed; the shape self-expires.
    Expired,
}

/// A convex shape anchored to a world-space point and drawn in screen
/// space: marker, label background, callout. Identity-bearing; exactly one
/// shape per id lives in a generator at a time.
#[derive(Clone, Debug)]
pub struct ScreenShape {
    pub id: ShapeId,
    /// World-space anchor projected each frame.
    pub world_loc: Vec3,
    /// `Some(angle)` rotates the local geometry by that fixed angle,
    /// clockwise from north and adjusted for camera heading; `None` leaves
    /// it axis-aligned on screen.
    pub rotation: Option<f32>,
    pub fade_up: Option<FadeSpan>,
    pub fade_down: Option<FadeSpan>,
    /// Submission-order hint for the renderer; higher priority batches are
    /// drawn later, on top.
    pub draw_priority: i32,
    /// Camera-height visibility range; both zero means always visible.
    pub min_vis: f32,
    pub max_vis: f32,
    /// Pixel offset applied after projection.
    pub offset: Vec2,
    pub geometry: Vec<ShapeGeometry>,
}

impl ScreenShape {
    pub fn new(world_loc: Vec3) -> Self {
        ScreenShape {
            id: ShapeId::next(),
            world_loc,
            rotation: None,
            fade_up: None,
            fade_down: None,
            draw_priority: 0,
            min_vis: 0.0,
            max_vis: 0.0,
            offset: Vec2::ZERO,
            geometry: Vec::new(),
        }
    }

    /// Replace the fade window. Panics if the fade-up span ends after the
    /// fade-down span begins.
    pub fn set_fade(&mut self, fade_up: Option<FadeSpan>, fade_down: Option<FadeSpan>) {
        if let (Some(up), Some(down)) = (fade_up, fade_down) {
            assert!(
                up.end() <= down.start(),
                "fade-up must complete before fade-down begins"
            );
        }
        self.fade_up = fade_up;
        self.fade_down = fade_down;
    }

    /// Opacity state at `time` per the fade window: hidden before fade-up
    /// starts, linear 0 to 1 over the fade-up span, steady 1, linear 1 to 0
    /// over the fade-down span, expired once fade-down completes. An unset
    /// edge contributes full opacity.
    pub fn fade_state(&self, time: f64) -> FadeState {
        if let Some(down) = self.fade_down {
            if time >= down.end() {
                return FadeState::Expired;
            }
        }
        let rising = match self.fade_up {
            None => 1.0,
            Some(up) => {
                if time < up.start() {
                    return FadeState::Hidden;
                }
                up.ramp_up(time)
            }
        };
        let falling = match self.fade_down {
            None => 1.0,
            Some(down) => 1.0 - down.ramp_up(time),
        };
        FadeState::Visible(rising.min(falling))
    }

    /// Height culling test; `min_vis == max_vis == 0` disables it.
    pub fn visible_at_height(&self, height: f32) -> bool {
        if self.min_vis == 0.0 && self.max_vis == 0.0 {
            return true;
        }
        height >= self.min_vis && height <= self.max_vis
    }
}
