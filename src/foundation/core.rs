use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{BezPath, Point, Rect};

/// Number of ticks a scene has received during its current Active period.
///
/// Starts at 0 on activation and is incremented before each ticker call, so the first frame a
/// scene draws sees `FrameCounter(1)`. Motion advances per host frame rather than per unit of
/// time, so animation speed follows the display's refresh rate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameCounter(pub u64);

impl FrameCounter {
    /// Counter value as `f64`, for the sine/cosine motion formulas.
    pub fn t(self) -> f64 {
        self.0 as f64
    }

    /// Return the next counter value.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Logical drawing resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Base resolution every scene is authored against.
    pub const BASE: Canvas = Canvas {
        width: 320,
        height: 180,
    };

    /// Create a validated canvas. Both sides must fit the rasterizer's `u16` limits.
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::validation("canvas dimensions must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SceneError::validation("canvas dimensions must fit in u16"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Bytes needed for a tightly packed RGBA8 buffer of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::BASE
    }
}

/// Opaque straight-alpha colour, authored as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Unpack a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert an opaque colour at `alpha` in `[0, 1]` into premultiplied RGBA8.
    pub fn from_rgb_alpha(color: Rgb8, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
        Self {
            r: premul(color.r),
            g: premul(color.g),
            b: premul(color.b),
            a: a as u8,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
