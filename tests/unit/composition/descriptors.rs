use super::*;
use crate::composition::params::{FontFamily, HorizontalAnchor, TextEffect, VerticalAnchor};

#[test]
fn chill_vibes_css_json() {
    let params = CompositionParameters {
        text: "Chill Vibes".to_string(),
        font_size_px: 40,
        font_family: FontFamily::Inter,
        vertical_anchor: VerticalAnchor::Bottom,
        horizontal_anchor: HorizontalAnchor::Center,
        text_effect: TextEffect::ShadowMd,
        rotation_deg: 0,
        text_color: "#FFFFFF".to_string(),
    };
    let json = CoverDescriptors::compute(&params).to_css_json();

    assert_eq!(json["text"]["font_size"], "40px");
    assert_eq!(json["text"]["font_family"], "Inter");
    assert_eq!(json["text"]["transform"], serde_json::Value::Null);
    assert_eq!(json["text"]["text_shadow"], "0 2px 4px rgba(0,0,0,0.4)");
    assert_eq!(json["position"]["classes"], "bottom-12 text-center px-12");
    assert_eq!(
        json["overlay"]["classes"],
        "bg-gradient-to-t from-black/60 via-transparent to-transparent"
    );
}

#[test]
fn descriptors_depend_only_on_their_inputs() {
    let a = CompositionParameters::default();
    let b = CompositionParameters {
        text: "Other words".to_string(),
        ..CompositionParameters::default()
    };
    assert_eq!(CoverDescriptors::compute(&a), CoverDescriptors::compute(&b));
}

#[test]
fn serializes_typed_descriptors() {
    let d = CoverDescriptors::compute(&CompositionParameters::default());
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v["text_style"]["font_size_px"], 31);
    assert!(v["position"].is_object());
    assert!(v["overlay"].is_object());
}
