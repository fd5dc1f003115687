use crate::foundation::error::{BrandmarkError, BrandmarkResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest supported edge length; the raster backend addresses pixels with `u16`.
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Create a validated canvas with both edges in `1..=MAX_DIM`.
    pub fn new(width: u32, height: u32) -> BrandmarkResult<Self> {
        if width == 0 || height == 0 {
            return Err(BrandmarkError::validation(format!(
                "canvas must be at least 1x1, got {width}x{height}"
            )));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(BrandmarkError::validation(format!(
                "canvas {width}x{height} exceeds {max}x{max}",
                max = Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
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

    /// Opaque white.
    pub fn white() -> Self {
        Self::from_straight_rgba(255, 255, 255, 255)
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert a straight-alpha `[r, g, b, a]` array.
    pub fn from_straight_array(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self::from_straight_rgba(r, g, b, a)
    }

    /// Recover straight-alpha channels (lossy for low alpha).
    pub fn to_straight_array(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
