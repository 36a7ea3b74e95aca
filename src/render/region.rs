use std::fmt::Write;

use crate::assets::background::BackgroundImage;
use crate::assets::color::resolve_text_color;
use crate::composition::descriptors::CoverDescriptors;
use crate::composition::document::RenderSettings;
use crate::composition::layout::{GradientDirection, Overlay};
use crate::composition::params::CompositionParameters;
use crate::foundation::core::{Affine, Canvas, Color, Point};
use crate::foundation::error::CoverResult;

/// Line height of the text layer in em.
pub const LINE_HEIGHT_EM: f64 = 1.5;
/// Weight of the heading that carries the text.
pub const FONT_WEIGHT: u16 = 700;

/// Owned snapshot of the composed cover: background plus an SVG document holding the overlay
/// and the text layer.
///
/// Capturing copies everything it needs, so edits made after capture never reach a region
/// that is being rasterized.
#[derive(Clone, Debug)]
pub struct RenderedRegion {
    canvas: Canvas,
    scale: f32,
    background: Option<BackgroundImage>,
    params: CompositionParameters,
    descriptors: CoverDescriptors,
    overlay_svg: String,
}

impl RenderedRegion {
    /// Compose the region for `params` over an optional background.
    #[tracing::instrument(
        skip_all,
        fields(size_px = settings.size_px, has_background = background.is_some())
    )]
    pub fn capture(
        params: &CompositionParameters,
        background: Option<&BackgroundImage>,
        settings: &RenderSettings,
    ) -> CoverResult<Self> {
        let canvas = settings.canvas()?;
        let params = params.clamped();
        let descriptors = CoverDescriptors::compute(&params);
        let overlay_svg = build_overlay_svg(canvas, &params, &descriptors);
        Ok(Self {
            canvas,
            scale: settings.scale,
            background: background.cloned(),
            params,
            descriptors,
            overlay_svg,
        })
    }

    /// Region size in CSS px.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Device pixels per CSS px.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Background captured with the region, if any.
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Return `true` when a background was present at capture time.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Parameters the region was composed from.
    pub fn params(&self) -> &CompositionParameters {
        &self.params
    }

    /// Descriptors the region was composed from.
    pub fn descriptors(&self) -> &CoverDescriptors {
        &self.descriptors
    }

    /// SVG document painted over the background.
    pub fn overlay_svg(&self) -> &str {
        &self.overlay_svg
    }
}

fn build_overlay_svg(
    canvas: Canvas,
    params: &CompositionParameters,
    d: &CoverDescriptors,
) -> String {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut svg = String::with_capacity(2048);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );

    svg.push_str("<defs>");
    if let Overlay::Gradient { direction, stops } = &d.overlay {
        let (y1, y2) = match direction {
            GradientDirection::ToBottom => (0, 1),
            GradientDirection::ToTop => (1, 0),
        };
        let _ = write!(
            svg,
            "<linearGradient id=\"overlay\" x1=\"0\" y1=\"{y1}\" x2=\"0\" y2=\"{y2}\">"
        );
        for stop in stops {
            let _ = write!(
                svg,
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                stop.offset,
                stop.color.hex_rgb(),
                stop.color.alpha
            );
        }
        svg.push_str("</linearGradient>");
    }
    let shadows = d.text_style.text_shadow.layers();
    for (i, layer) in shadows.iter().enumerate() {
        if layer.blur_px == 0 {
            continue;
        }
        // CSS blur radius is twice the Gaussian standard deviation.
        let _ = write!(
            svg,
            "<filter id=\"shadow-{i}\" filterUnits=\"userSpaceOnUse\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"><feGaussianBlur stdDeviation=\"{}\"/></filter>",
            -w,
            -h,
            3.0 * w,
            3.0 * h,
            f64::from(layer.blur_px) / 2.0
        );
    }
    svg.push_str("</defs>");

    match &d.overlay {
        Overlay::Gradient { .. } => {
            let _ = write!(
                svg,
                "<rect width=\"{w}\" height=\"{h}\" fill=\"url(#overlay)\"/>"
            );
        }
        Overlay::Flat { color } => {
            let _ = write!(
                svg,
                "<rect width=\"{w}\" height=\"{h}\" fill=\"{}\" fill-opacity=\"{}\"/>",
                color.hex_rgb(),
                color.alpha
            );
        }
    }

    let style = &d.text_style;
    let font_size = f64::from(style.font_size_px);
    let line_height = font_size * LINE_HEIGHT_EM;
    let lines: Vec<&str> = params.text.split('\n').collect();
    let box_height = line_height * lines.len() as f64;
    let box_top = d.position.box_top(h, box_height);
    let (anchor_x, text_anchor) = d.position.anchor_x(w);

    let _ = write!(
        svg,
        "<g font-family=\"{}\" font-size=\"{font_size}\" font-weight=\"{FONT_WEIGHT}\" text-anchor=\"{text_anchor}\"",
        style.font_family.render_stack()
    );
    if style.rotation_deg != 0 {
        // CSS rotates around the centre of the full-width text box.
        let centre = Point::new(w / 2.0, box_top + box_height / 2.0);
        let m = Affine::rotate_about(f64::from(style.rotation_deg).to_radians(), centre);
        let [a, b, c, dd, e, f] = m.as_coeffs();
        let _ = write!(svg, " transform=\"matrix({a} {b} {c} {dd} {e} {f})\"");
    }
    svg.push('>');

    // CSS paints the first shadow on top, so emit in reverse before the text itself.
    for (i, layer) in shadows.iter().enumerate().rev() {
        let _ = write!(
            svg,
            "<g transform=\"translate({} {})\"",
            layer.offset_x, layer.offset_y
        );
        if layer.blur_px > 0 {
            let _ = write!(svg, " filter=\"url(#shadow-{i})\"");
        }
        svg.push('>');
        write_lines(&mut svg, &lines, anchor_x, box_top, line_height, layer.color);
        svg.push_str("</g>");
    }
    let text_color = resolve_text_color(&style.color);
    write_lines(&mut svg, &lines, anchor_x, box_top, line_height, text_color);

    svg.push_str("</g></svg>");
    svg
}

fn write_lines(
    svg: &mut String,
    lines: &[&str],
    x: f64,
    box_top: f64,
    line_height: f64,
    color: Color,
) {
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let y = box_top + line_height * (i as f64 + 0.5);
        let _ = write!(
            svg,
            "<text x=\"{x}\" y=\"{y}\" dominant-baseline=\"central\" xml:space=\"preserve\" fill=\"{}\" fill-opacity=\"{}\">{}</text>",
            color.hex_rgb(),
            color.alpha,
            escape_xml(line)
        );
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/region.rs"]
mod tests;
