//! playlist-cover composes square playlist covers and exports them as PNG.
//!
//! A cover is one background image, one darkening overlay and one text layer. The text layer is
//! driven by a flat parameter record ([`CompositionParameters`]) with a fixed set of fonts,
//! anchors and effects.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`CoverEditor::apply`] changes one parameter and recomputes the descriptors.
//! 2. **Describe**: [`compute_text_layer_style`], [`compute_layer_position`] and
//!    [`compute_overlay_gradient`] map parameters to presentation descriptors. They are pure and
//!    total.
//! 3. **Capture**: [`RenderedRegion::capture`] snapshots the composition as a background bitmap
//!    plus an SVG overlay document.
//! 4. **Export**: [`Exporter::export`] checks for a background, rasterizes through a
//!    [`Rasterizer`], encodes PNG and hands it to a [`DownloadTarget`] as
//!    [`EXPORT_FILE_NAME`].
//!
//! Rendering is CPU-only: the background is composited with `image`, the overlay and text are
//! painted with `resvg`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod editor;
mod export;
mod foundation;
mod render;

pub use assets::background::{
    BackgroundImage, ImageAdvisory, MAX_RECOMMENDED_EDGE_PX, MIN_RECOMMENDED_EDGE_PX,
    cover_crop_rect,
};
pub use assets::color::{parse_hex_color, resolve_text_color};
pub use assets::fonts::FontLibrary;
pub use composition::descriptors::CoverDescriptors;
pub use composition::document::{CoverDocument, RenderSettings};
pub use composition::layout::{
    EDGE_OFFSET_PX, GradientDirection, GradientStop, HORIZONTAL_PADDING_PX, HorizontalPlacement,
    LayerPosition, Overlay, TextAlign, VerticalPlacement, compute_layer_position,
    compute_overlay_gradient,
};
pub use composition::params::{
    CompositionParameters, FONT_SIZE_MAX_PX, FONT_SIZE_MIN_PX, FontFamily, HorizontalAnchor,
    ParamEdit, ROTATION_MAX_DEG, ROTATION_MIN_DEG, TextEffect, VerticalAnchor,
};
pub use composition::style::{
    ShadowLayer, TextLayerStyle, TextShadow, compute_text_layer_style, text_shadow_for,
};
pub use editor::CoverEditor;
pub use export::download::{DirectoryDownloads, DownloadTarget, MemoryDownloads};
pub use export::pipeline::{
    EXPORT_FILE_NAME, ExportError, ExportFailure, ExportPhase, ExportedCover, Exporter,
    LogNotifier, Notice, Notifier,
};
pub use foundation::core::{Affine, Canvas, Color, Point};
pub use foundation::error::{CoverError, CoverResult};
pub use render::raster::{
    CaptureOptions, MAX_RASTER_DIM, PngPayload, RasterImage, Rasterizer, SoftwareRasterizer,
    encode_png,
};
pub use render::region::{FONT_WEIGHT, LINE_HEIGHT_EM, RenderedRegion};
