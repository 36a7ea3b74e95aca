use crate::foundation::error::{CoverError, CoverResult};

pub use kurbo::{Affine, Point};

/// Region dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl Canvas {
    /// Square canvas with `side` pixels on each edge.
    pub fn square(side: u32) -> CoverResult<Self> {
        if side == 0 {
            return Err(CoverError::validation("canvas side must be > 0"));
        }
        Ok(Self {
            width: side,
            height: side,
        })
    }

    /// Device pixel size after applying `scale`, never smaller than 1x1.
    pub fn scaled(self, scale: f32) -> (u32, u32) {
        let w = ((self.width as f32) * scale).round().max(1.0) as u32;
        let h = ((self.height as f32) * scale).round().max(1.0) as u32;
        (w, h)
    }
}

/// Straight-alpha sRGB color with 8-bit channels and a fractional alpha.
///
/// The fractional alpha keeps CSS values such as `rgba(0,0,0,0.3)` exact.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub alpha: f32,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    /// Return the same color with `alpha` replaced.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Opaque part as `#rrggbb`, used for SVG `fill`/`stop-color` attributes.
    pub fn hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS serialization: short hex for opaque colors when possible, `rgba(...)` otherwise.
    pub fn css(self) -> String {
        if self.alpha >= 1.0 {
            let short = |c: u8| c >> 4 == c & 0x0f;
            if short(self.r) && short(self.g) && short(self.b) {
                return format!("#{:x}{:x}{:x}", self.r & 0x0f, self.g & 0x0f, self.b & 0x0f);
            }
            return self.hex_rgb();
        }
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.alpha)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
