use serde_json::json;

use super::*;

#[test]
fn defaults_match_fresh_editor() {
    let p = CompositionParameters::default();
    assert_eq!(p.text, "My Playlist");
    assert_eq!(p.font_size_px, 31);
    assert_eq!(p.font_family, FontFamily::SfProDisplay);
    assert_eq!(p.vertical_anchor, VerticalAnchor::Bottom);
    assert_eq!(p.horizontal_anchor, HorizontalAnchor::Center);
    assert_eq!(p.text_effect, TextEffect::None);
    assert_eq!(p.rotation_deg, 0);
    assert_eq!(p.text_color, "#FFFFFF");
}

#[test]
fn setters_accept_domain_edges_and_clamp_outside() {
    let mut p = CompositionParameters::default();
    p.set_font_size_px(16);
    assert_eq!(p.font_size_px, 16);
    p.set_font_size_px(72);
    assert_eq!(p.font_size_px, 72);
    p.set_font_size_px(5);
    assert_eq!(p.font_size_px, 16);
    p.set_font_size_px(500);
    assert_eq!(p.font_size_px, 72);

    p.set_rotation_deg(-180);
    assert_eq!(p.rotation_deg, -180);
    p.set_rotation_deg(181);
    assert_eq!(p.rotation_deg, 180);
    p.set_rotation_deg(i64::MIN);
    assert_eq!(p.rotation_deg, -180);
}

#[test]
fn edits_apply_in_order() {
    let mut p = CompositionParameters::default();
    for edit in [
        ParamEdit::Text("Chill".to_string()),
        ParamEdit::Rotation(45),
        ParamEdit::Rotation(-30),
        ParamEdit::FontSize(40),
        ParamEdit::TextEffect(TextEffect::ShadowLg),
        ParamEdit::TextColor("#00ff00".to_string()),
    ] {
        p.apply(edit);
    }
    assert_eq!(p.text, "Chill");
    assert_eq!(p.rotation_deg, -30);
    assert_eq!(p.font_size_px, 40);
    assert_eq!(p.text_effect, TextEffect::ShadowLg);
    assert_eq!(p.text_color, "#00ff00");

    p.apply(ParamEdit::ResetRotation);
    assert_eq!(p.rotation_deg, 0);
}

#[test]
fn clamped_repairs_directly_assigned_fields() {
    let p = CompositionParameters {
        font_size_px: 2,
        rotation_deg: 720,
        ..CompositionParameters::default()
    };
    let c = p.clamped();
    assert_eq!(c.font_size_px, 16);
    assert_eq!(c.rotation_deg, 180);
}

#[test]
fn json_uses_kebab_ids_and_accepts_legacy_aliases() {
    let p: CompositionParameters = serde_json::from_value(json!({
        "text": "Late Night",
        "font_family": "playfair-display",
        "text_effect": "text-stroke-dark",
        "vertical_anchor": "top"
    }))
    .unwrap();
    assert_eq!(p.font_family, FontFamily::PlayfairDisplay);
    assert_eq!(p.text_effect, TextEffect::OutlineDark);
    assert_eq!(p.vertical_anchor, VerticalAnchor::Top);
    assert_eq!(p.font_size_px, 31);

    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["text_effect"], "outline-dark");
    assert_eq!(v["font_family"], "playfair-display");

    let bad = serde_json::from_value::<CompositionParameters>(json!({ "colour": "#fff" }));
    assert!(bad.is_err());
}

#[test]
fn from_str_accepts_names_ids_and_css_values() {
    assert_eq!("Playfair Display".parse::<FontFamily>().unwrap(), FontFamily::PlayfairDisplay);
    assert_eq!("-apple-system".parse::<FontFamily>().unwrap(), FontFamily::SfProDisplay);
    assert_eq!("sf_pro_display".parse::<FontFamily>().unwrap(), FontFamily::SfProDisplay);
    assert!("Comic Sans".parse::<FontFamily>().is_err());

    assert_eq!("Shadow-MD".parse::<TextEffect>().unwrap(), TextEffect::ShadowMd);
    assert_eq!("text-stroke-light".parse::<TextEffect>().unwrap(), TextEffect::OutlineLight);
    assert_eq!("middle".parse::<VerticalAnchor>().unwrap(), VerticalAnchor::Center);
    assert_eq!("right".parse::<HorizontalAnchor>().unwrap(), HorizontalAnchor::Right);
    assert!("diagonal".parse::<HorizontalAnchor>().is_err());
}

#[test]
fn ids_parse_back_to_the_same_choice() {
    for f in FontFamily::ALL {
        assert_eq!(f.id().parse::<FontFamily>(), Ok(f));
    }
    for e in TextEffect::ALL {
        assert_eq!(e.id().parse::<TextEffect>(), Ok(e));
    }
}
