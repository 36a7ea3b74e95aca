use std::io::Cursor;

use anyhow::Context;
use image::ImageEncoder;

use crate::assets::fonts::{FontLibrary, make_font_resolver};
use crate::foundation::core::Color;
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::region::RenderedRegion;

/// Largest edge, in device pixels, a rasterizer will allocate.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Options handed to every [`Rasterizer`] for one capture.
///
/// `use_cors` and `allow_taint` permit cross-origin background images to be read back;
/// `background_color: None` keeps the canvas transparent so only the region's own pixels show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOptions {
    /// Fetch remote images with CORS.
    pub use_cors: bool,
    /// Allow cross-origin pixels to taint the canvas.
    pub allow_taint: bool,
    /// Fill painted under the region, `None` for transparent.
    pub background_color: Option<Color>,
    /// Device pixels per CSS px.
    pub scale: f32,
}

impl CaptureOptions {
    /// Export options for `region`: cross-origin reads allowed, transparent fill, region scale.
    pub fn for_region(region: &RenderedRegion) -> Self {
        Self {
            use_cors: true,
            allow_taint: true,
            background_color: None,
            scale: region.scale(),
        }
    }
}

/// Rasterized region as straight-alpha RGBA8 bytes, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// RGBA of the pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Converts a captured region into pixels.
///
/// Implementations block until the image is ready and must honour [`CaptureOptions::scale`].
pub trait Rasterizer {
    /// Paint `region` at `opts.scale` device pixels per CSS px.
    fn rasterize(
        &mut self,
        region: &RenderedRegion,
        opts: &CaptureOptions,
    ) -> CoverResult<RasterImage>;
}

/// CPU rasterizer: background composited with `image`, overlay and text painted with `resvg`.
#[derive(Clone, Debug, Default)]
pub struct SoftwareRasterizer {
    fonts: FontLibrary,
}

impl SoftwareRasterizer {
    /// Rasterizer shaping text with `fonts`.
    pub fn new(fonts: FontLibrary) -> Self {
        Self { fonts }
    }

    /// Fonts used to shape the text layer.
    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }
}

impl Rasterizer for SoftwareRasterizer {
    #[tracing::instrument(skip_all, fields(scale = opts.scale))]
    fn rasterize(
        &mut self,
        region: &RenderedRegion,
        opts: &CaptureOptions,
    ) -> CoverResult<RasterImage> {
        // Pixels are read in-process, so cross-origin flags have nothing to gate here.
        tracing::debug!(
            use_cors = opts.use_cors,
            allow_taint = opts.allow_taint,
            "capture options"
        );

        if !opts.scale.is_finite() || opts.scale <= 0.0 {
            return Err(CoverError::validation(format!(
                "capture scale must be finite and > 0, got {}",
                opts.scale
            )));
        }
        let canvas = region.canvas();
        let (width, height) = canvas.scaled(opts.scale);
        if width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
            return Err(CoverError::render(format!(
                "raster size too large: {width}x{height} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| CoverError::render("failed to allocate cover pixmap"))?;
        if let Some(c) = opts.background_color {
            pixmap.fill(resvg::tiny_skia::Color::from_rgba8(
                c.r,
                c.g,
                c.b,
                alpha_u8(c.alpha),
            ));
        }

        if let Some(bg) = region.background() {
            let cover = bg.cover_to(width, height);
            let size = resvg::tiny_skia::IntSize::from_wh(width, height)
                .ok_or_else(|| CoverError::render("invalid background size"))?;
            let bg_pixmap = resvg::tiny_skia::Pixmap::from_vec(premultiply(cover.into_raw()), size)
                .ok_or_else(|| CoverError::render("failed to wrap background pixels"))?;
            pixmap.draw_pixmap(
                0,
                0,
                bg_pixmap.as_ref(),
                &resvg::tiny_skia::PixmapPaint::default(),
                resvg::tiny_skia::Transform::identity(),
                None,
            );
        }

        let usvg_opts = usvg::Options {
            fontdb: self.fonts.database(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(region.overlay_svg(), &usvg_opts)
            .context("parse cover overlay svg")?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        tracing::debug!(width, height, "cover rasterized");
        Ok(RasterImage {
            width,
            height,
            data,
        })
    }
}

/// Encoded PNG bytes ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngPayload(pub Vec<u8>);

impl PngPayload {
    /// Encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` for an empty payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encode a raster as PNG.
pub fn encode_png(raster: &RasterImage) -> CoverResult<PngPayload> {
    let expected = (raster.width as usize) * (raster.height as usize) * 4;
    if raster.width == 0 || raster.height == 0 || raster.data.len() != expected {
        return Err(CoverError::render(format!(
            "raster buffer does not match {}x{} rgba8 ({} bytes)",
            raster.width,
            raster.height,
            raster.data.len()
        )));
    }
    let mut out = Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &raster.data,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoverError::render(format!("png encode failed: {e}")))?;
    Ok(PngPayload(out.into_inner()))
}

fn alpha_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn premultiply(mut rgba: Vec<u8>) -> Vec<u8> {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
    rgba
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
