use super::*;
use crate::assets::background::BackgroundImage;
use crate::composition::document::RenderSettings;
use crate::composition::params::{CompositionParameters, VerticalAnchor};

fn red_background() -> BackgroundImage {
    BackgroundImage::from_rgba(image::RgbaImage::from_pixel(
        64,
        32,
        image::Rgba([255, 0, 0, 255]),
    ))
}

fn textless(vertical_anchor: VerticalAnchor) -> CompositionParameters {
    CompositionParameters {
        text: " ".to_string(),
        vertical_anchor,
        ..CompositionParameters::default()
    }
}

fn region(
    params: &CompositionParameters,
    background: Option<&BackgroundImage>,
    size_px: u32,
    scale: f32,
) -> RenderedRegion {
    RenderedRegion::capture(params, background, &RenderSettings { size_px, scale }).unwrap()
}

fn close(actual: u8, expected: u8) -> bool {
    actual.abs_diff(expected) <= 2
}

#[test]
fn capture_options_for_region_are_fixed_except_scale() {
    let r = region(&textless(VerticalAnchor::Bottom), None, 16, 2.0);
    let opts = CaptureOptions::for_region(&r);
    assert!(opts.use_cors);
    assert!(opts.allow_taint);
    assert_eq!(opts.background_color, None);
    assert_eq!(opts.scale, 2.0);
}

#[test]
fn raster_size_follows_scale() {
    let r = region(&textless(VerticalAnchor::Bottom), None, 16, 2.0);
    let opts = CaptureOptions::for_region(&r);
    let img = SoftwareRasterizer::default().rasterize(&r, &opts).unwrap();
    assert_eq!((img.width, img.height), (32, 32));
    assert_eq!(img.data.len(), 32 * 32 * 4);
}

#[test]
fn centre_overlay_darkens_background_uniformly() {
    let bg = red_background();
    let r = region(&textless(VerticalAnchor::Center), Some(&bg), 16, 1.0);
    let opts = CaptureOptions::for_region(&r);
    let img = SoftwareRasterizer::default().rasterize(&r, &opts).unwrap();

    for (x, y) in [(0, 0), (8, 8), (15, 15)] {
        let [red, g, b, a] = img.pixel(x, y).unwrap();
        assert!(close(red, 179), "red {red} at ({x},{y})");
        assert_eq!((g, b, a), (0, 0, 255));
    }
}

#[test]
fn bottom_gradient_is_dark_at_the_bottom_only() {
    let bg = red_background();
    let r = region(&textless(VerticalAnchor::Bottom), Some(&bg), 32, 1.0);
    let opts = CaptureOptions::for_region(&r);
    let img = SoftwareRasterizer::default().rasterize(&r, &opts).unwrap();

    let top = img.pixel(16, 0).unwrap();
    let bottom = img.pixel(16, 31).unwrap();
    assert!(close(top[0], 255), "top {top:?}");
    assert!(bottom[0] < 115, "bottom {bottom:?}");
    assert_eq!(bottom[3], 255);
}

#[test]
fn missing_background_leaves_only_overlay_alpha() {
    let r = region(&textless(VerticalAnchor::Center), None, 8, 1.0);
    let opts = CaptureOptions::for_region(&r);
    let img = SoftwareRasterizer::default().rasterize(&r, &opts).unwrap();
    let [red, g, b, a] = img.pixel(4, 4).unwrap();
    assert_eq!((red, g, b), (0, 0, 0));
    assert!(close(a, 77), "alpha {a}");
}

#[test]
fn background_color_fills_under_region() {
    let r = region(&textless(VerticalAnchor::Top), None, 8, 1.0);
    let opts = CaptureOptions {
        background_color: Some(Color::rgb(0, 0, 255)),
        ..CaptureOptions::for_region(&r)
    };
    let img = SoftwareRasterizer::default().rasterize(&r, &opts).unwrap();
    // The top gradient is transparent from the middle down.
    assert_eq!(img.pixel(4, 7), Some([0, 0, 255, 255]));
}

#[test]
fn oversized_and_invalid_scales_are_rejected() {
    let r = region(&textless(VerticalAnchor::Bottom), None, 512, 2.0);
    let mut rasterizer = SoftwareRasterizer::default();

    let huge = CaptureOptions {
        scale: 64.0,
        ..CaptureOptions::for_region(&r)
    };
    assert!(matches!(
        rasterizer.rasterize(&r, &huge),
        Err(CoverError::Render(_))
    ));

    let nan = CaptureOptions {
        scale: f32::NAN,
        ..CaptureOptions::for_region(&r)
    };
    assert!(matches!(
        rasterizer.rasterize(&r, &nan),
        Err(CoverError::Validation(_))
    ));
}

#[test]
fn encode_png_produces_decodable_image() {
    let raster = RasterImage {
        width: 3,
        height: 2,
        data: [10u8, 20, 30, 255].repeat(6),
    };
    let png = encode_png(&raster).unwrap();
    assert!(png.as_bytes().starts_with(b"\x89PNG\r\n\x1a\n"));

    let decoded = image::load_from_memory(png.as_bytes()).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn encode_png_rejects_mismatched_buffer() {
    let raster = RasterImage {
        width: 4,
        height: 4,
        data: vec![0; 10],
    };
    assert!(matches!(encode_png(&raster), Err(CoverError::Render(_))));
}

#[test]
fn premultiply_scales_colour_by_alpha() {
    assert_eq!(premultiply(vec![200, 100, 50, 128]), vec![100, 50, 25, 128]);
    assert_eq!(premultiply(vec![200, 100, 50, 0]), vec![0, 0, 0, 0]);
    assert_eq!(premultiply(vec![1, 2, 3, 255]), vec![1, 2, 3, 255]);
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let raster = RasterImage {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 4],
    };
    assert_eq!(raster.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(raster.pixel(1, 0), None);
}
