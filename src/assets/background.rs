use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{CoverError, CoverResult};

/// Smallest recommended background edge in pixels.
pub const MIN_RECOMMENDED_EDGE_PX: u32 = 1000;
/// Largest recommended background edge in pixels.
pub const MAX_RECOMMENDED_EDGE_PX: u32 = 4000;

/// Decoded background image, shared cheaply between the editor and captured regions.
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    image: Arc<image::RgbaImage>,
    format: Option<image::ImageFormat>,
}

/// Non-fatal observations about an uploaded background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageAdvisory {
    /// Width and height differ; the cover crops to a square.
    NotSquare {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },
    /// Shorter edge is below [`MIN_RECOMMENDED_EDGE_PX`].
    BelowMinimumSize {
        /// Shorter edge in pixels.
        edge: u32,
    },
    /// Longer edge is above [`MAX_RECOMMENDED_EDGE_PX`].
    AboveMaximumSize {
        /// Longer edge in pixels.
        edge: u32,
    },
    /// Decoded, but not one of the recommended JPG/PNG formats.
    UncommonFormat,
}

impl std::fmt::Display for ImageAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSquare { width, height } => {
                write!(f, "image is {width}x{height}; square format (1:1) is recommended")
            }
            Self::BelowMinimumSize { edge } => write!(
                f,
                "image edge {edge}px is below the recommended {MIN_RECOMMENDED_EDGE_PX}px"
            ),
            Self::AboveMaximumSize { edge } => write!(
                f,
                "image edge {edge}px exceeds the recommended {MAX_RECOMMENDED_EDGE_PX}px"
            ),
            Self::UncommonFormat => f.write_str("recommended formats are JPG and PNG"),
        }
    }
}

impl BackgroundImage {
    /// Decode encoded image bytes (any format the `image` crate recognizes).
    pub fn from_bytes(bytes: &[u8]) -> CoverResult<Self> {
        let format = image::guess_format(bytes).ok();
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| CoverError::decode(format!("decode background image: {e}")))?;
        let bg = Self {
            image: Arc::new(dyn_img.to_rgba8()),
            format,
        };
        for advisory in bg.advisories() {
            tracing::warn!(%advisory, "background image advisory");
        }
        Ok(bg)
    }

    /// Read and decode a background image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> CoverResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read background image '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already decoded image.
    pub fn from_rgba(image: image::RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
            format: None,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Straight-alpha pixels.
    pub fn rgba(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Upload recommendations this image does not meet.
    pub fn advisories(&self) -> Vec<ImageAdvisory> {
        let (w, h) = (self.width(), self.height());
        let mut out = Vec::new();
        if w != h {
            out.push(ImageAdvisory::NotSquare {
                width: w,
                height: h,
            });
        }
        if w.min(h) < MIN_RECOMMENDED_EDGE_PX {
            out.push(ImageAdvisory::BelowMinimumSize { edge: w.min(h) });
        }
        if w.max(h) > MAX_RECOMMENDED_EDGE_PX {
            out.push(ImageAdvisory::AboveMaximumSize { edge: w.max(h) });
        }
        if let Some(fmt) = self.format
            && !matches!(fmt, image::ImageFormat::Png | image::ImageFormat::Jpeg)
        {
            out.push(ImageAdvisory::UncommonFormat);
        }
        out
    }

    /// Scale to fill `width`x`height` and centre-crop the overflow (CSS `object-fit: cover`).
    pub fn cover_to(&self, width: u32, height: u32) -> image::RgbaImage {
        let (crop_x, crop_y, crop_w, crop_h) =
            cover_crop_rect(self.width(), self.height(), width, height);
        let cropped = image::imageops::crop_imm(&*self.image, crop_x, crop_y, crop_w, crop_h)
            .to_image();
        if (crop_w, crop_h) == (width, height) {
            return cropped;
        }
        image::imageops::resize(
            &cropped,
            width,
            height,
            image::imageops::FilterType::Lanczos3,
        )
    }
}

/// Source rectangle `(x, y, w, h)` that `object-fit: cover` keeps when mapping a
/// `src_w`x`src_h` image onto a `dst_w`x`dst_h` box.
pub fn cover_crop_rect(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return (0, 0, src_w, src_h);
    }
    // Compare aspect ratios without floats: src_w/src_h vs dst_w/dst_h.
    let lhs = u64::from(src_w) * u64::from(dst_h);
    let rhs = u64::from(dst_w) * u64::from(src_h);
    if lhs > rhs {
        // Source is wider: keep full height.
        let w = ((rhs / u64::from(dst_h)) as u32).clamp(1, src_w);
        ((src_w - w) / 2, 0, w, src_h)
    } else {
        let h = ((lhs / u64::from(dst_w)) as u32).clamp(1, src_h);
        (0, (src_h - h) / 2, src_w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/background.rs"]
mod tests;
