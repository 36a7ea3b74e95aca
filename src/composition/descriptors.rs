use serde::Serialize;

use crate::composition::layout::{
    LayerPosition, Overlay, compute_layer_position, compute_overlay_gradient,
};
use crate::composition::params::CompositionParameters;
use crate::composition::style::{TextLayerStyle, compute_text_layer_style};

/// Every descriptor derived from one parameter snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoverDescriptors {
    /// Text layer style.
    pub text_style: TextLayerStyle,
    /// Text box placement.
    pub position: LayerPosition,
    /// Legibility overlay.
    pub overlay: Overlay,
}

impl CoverDescriptors {
    /// Run the three derivations. O(1), no side effects.
    pub fn compute(params: &CompositionParameters) -> Self {
        Self {
            text_style: compute_text_layer_style(params),
            position: compute_layer_position(params.vertical_anchor, params.horizontal_anchor),
            overlay: compute_overlay_gradient(params.vertical_anchor),
        }
    }

    /// JSON view with the CSS strings a presentation layer would bind.
    pub fn to_css_json(&self) -> serde_json::Value {
        serde_json::json!({
            "text": {
                "style": self.text_style.to_inline_css(),
                "font_size": self.text_style.font_size_css(),
                "font_family": self.text_style.font_family.css_value(),
                "transform": self.text_style.transform_css(),
                "color": self.text_style.color,
                "text_shadow": self.text_style.text_shadow.css(),
            },
            "position": {
                "classes": self.position.class_list(),
                "style": self.position.to_inline_css(),
            },
            "overlay": {
                "classes": self.overlay.class_list(),
                "background": self.overlay.css(),
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/descriptors.rs"]
mod tests;
