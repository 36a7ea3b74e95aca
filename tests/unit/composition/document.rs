use std::path::PathBuf;

use super::*;
use crate::composition::params::TextEffect;

#[test]
fn empty_document_is_all_defaults() {
    let doc = CoverDocument::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(doc, CoverDocument::default());
    assert_eq!(doc.render.canvas().unwrap(), Canvas::square(512).unwrap());
}

#[test]
fn parses_partial_document() {
    let json = r##"{
        "params": { "text": "Road Trip", "text_effect": "shadow-lg", "rotation_deg": 12 },
        "background": "img/bg.png",
        "render": { "size_px": 256 }
    }"##;
    let doc = CoverDocument::from_reader(json.as_bytes()).unwrap();
    assert_eq!(doc.params.text, "Road Trip");
    assert_eq!(doc.params.text_effect, TextEffect::ShadowLg);
    assert_eq!(doc.params.rotation_deg, 12);
    assert_eq!(doc.background, Some(PathBuf::from("img/bg.png")));
    assert_eq!(doc.render.size_px, 256);
    assert_eq!(doc.render.scale, 2.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = CoverDocument::from_reader(r#"{ "backdrop": "x.png" }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn from_path_resolves_background_against_document_dir() {
    let dir = PathBuf::from("target").join("unit_cover_document");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cover.json");
    std::fs::write(&path, r#"{ "background": "bg.jpg" }"#).unwrap();

    let doc = CoverDocument::from_path(&path).unwrap();
    assert_eq!(doc.background, Some(dir.join("bg.jpg")));
}

#[test]
fn invalid_render_settings_fail_validation() {
    let zero = RenderSettings {
        size_px: 0,
        scale: 1.0,
    };
    assert!(zero.canvas().is_err());
    let nan = RenderSettings {
        size_px: 10,
        scale: f32::NAN,
    };
    assert!(nan.canvas().is_err());
}

#[test]
fn round_trips_through_pretty_json() {
    let doc = CoverDocument {
        background: Some(PathBuf::from("a.png")),
        ..CoverDocument::default()
    };
    let text = doc.to_json_pretty().unwrap();
    let back = CoverDocument::from_reader(text.as_bytes()).unwrap();
    assert_eq!(back, doc);
}
