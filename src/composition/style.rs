use serde::Serialize;

use crate::composition::params::{
    CompositionParameters, FontFamily, TextEffect, clamp_font_size, clamp_rotation,
};
use crate::foundation::core::Color;

/// One layer of a CSS `text-shadow` list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShadowLayer {
    /// Horizontal offset in CSS px.
    pub offset_x: i32,
    /// Vertical offset in CSS px.
    pub offset_y: i32,
    /// Blur radius in CSS px.
    pub blur_px: u32,
    /// Shadow color.
    pub color: Color,
}

impl ShadowLayer {
    const fn new(offset_x: i32, offset_y: i32, blur_px: u32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur_px,
            color,
        }
    }

    /// CSS serialization, e.g. `0 2px 4px rgba(0,0,0,0.4)`.
    pub fn css(&self) -> String {
        format!(
            "{} {} {} {}",
            css_len(self.offset_x),
            css_len(self.offset_y),
            css_len(self.blur_px as i32),
            self.color.css()
        )
    }
}

fn css_len(px: i32) -> String {
    if px == 0 {
        "0".to_string()
    } else {
        format!("{px}px")
    }
}

/// Text shadow value: empty means `none`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TextShadow(pub Vec<ShadowLayer>);

impl TextShadow {
    /// Return `true` for `text-shadow: none`.
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Shadow layers in CSS order (first layer paints on top).
    pub fn layers(&self) -> &[ShadowLayer] {
        &self.0
    }

    /// Largest `(|offset|, blur, alpha)` over all layers, all zero for `none`.
    pub fn magnitude(&self) -> (u32, u32, f32) {
        self.0.iter().fold((0, 0, 0.0), |(o, b, a), l| {
            let off = l.offset_x.unsigned_abs().max(l.offset_y.unsigned_abs());
            (o.max(off), b.max(l.blur_px), a.max(l.color.alpha))
        })
    }

    /// CSS serialization.
    pub fn css(&self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        self.0
            .iter()
            .map(ShadowLayer::css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const DROP: Color = Color::rgba(0, 0, 0, 1.0);

fn outline(color: Color) -> TextShadow {
    TextShadow(vec![
        ShadowLayer::new(-1, -1, 0, color),
        ShadowLayer::new(1, -1, 0, color),
        ShadowLayer::new(-1, 1, 0, color),
        ShadowLayer::new(1, 1, 0, color),
    ])
}

/// Shadow table keyed by effect.
pub fn text_shadow_for(effect: TextEffect) -> TextShadow {
    match effect {
        TextEffect::None => TextShadow::default(),
        TextEffect::ShadowSm => TextShadow(vec![ShadowLayer::new(0, 1, 2, DROP.with_alpha(0.3))]),
        TextEffect::ShadowMd => TextShadow(vec![ShadowLayer::new(0, 2, 4, DROP.with_alpha(0.4))]),
        TextEffect::ShadowLg => TextShadow(vec![ShadowLayer::new(0, 4, 8, DROP.with_alpha(0.5))]),
        TextEffect::OutlineLight => outline(Color::WHITE),
        TextEffect::OutlineDark => outline(Color::BLACK),
    }
}

/// Presentation of the text layer, ready to be emitted as inline CSS or painted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextLayerStyle {
    /// Text size in CSS px.
    pub font_size_px: u32,
    /// Typeface.
    pub font_family: FontFamily,
    /// Clockwise rotation in degrees; 0 means no transform.
    pub rotation_deg: i32,
    /// Color exactly as entered.
    pub color: String,
    /// Shadow/outline layers.
    pub text_shadow: TextShadow,
}

impl TextLayerStyle {
    /// `font-size` value, e.g. `40px`.
    pub fn font_size_css(&self) -> String {
        format!("{}px", self.font_size_px)
    }

    /// `transform` value, absent when unrotated.
    pub fn transform_css(&self) -> Option<String> {
        (self.rotation_deg != 0).then(|| format!("rotate({}deg)", self.rotation_deg))
    }

    /// Property/value pairs in emission order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("font-size", self.font_size_css()),
            ("font-family", self.font_family.css_value().to_string()),
        ];
        if let Some(t) = self.transform_css() {
            out.push(("transform", t));
        }
        out.push(("color", self.color.clone()));
        out.push(("text-shadow", self.text_shadow.css()));
        out
    }

    /// Inline `style` attribute body.
    pub fn to_inline_css(&self) -> String {
        inline_css(&self.declarations())
    }
}

pub(crate) fn inline_css(decls: &[(&'static str, String)]) -> String {
    decls
        .iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the text layer style from the parameters. Pure and total.
pub fn compute_text_layer_style(params: &CompositionParameters) -> TextLayerStyle {
    TextLayerStyle {
        font_size_px: clamp_font_size(i64::from(params.font_size_px)),
        font_family: params.font_family,
        rotation_deg: clamp_rotation(i64::from(params.rotation_deg)),
        color: params.text_color.clone(),
        text_shadow: text_shadow_for(params.text_effect),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/style.rs"]
mod tests;
