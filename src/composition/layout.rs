use serde::Serialize;

use crate::composition::params::{HorizontalAnchor, VerticalAnchor};
use crate::composition::style::inline_css;
use crate::foundation::core::Color;

/// Distance between the text box and the anchored edge (Tailwind spacing `12`).
pub const EDGE_OFFSET_PX: u32 = 48;
/// Symmetric horizontal padding of the text box.
pub const HORIZONTAL_PADDING_PX: u32 = 48;

/// Where the text box sits vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerticalPlacement {
    /// Box top at `offset_px` below the region top.
    FromTop {
        /// Offset in CSS px.
        offset_px: u32,
    },
    /// Box top at 50%, then shifted up by half its own height.
    Centered,
    /// Box bottom at `offset_px` above the region bottom.
    FromBottom {
        /// Offset in CSS px.
        offset_px: u32,
    },
}

/// CSS `text-align` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// `left`.
    Left,
    /// `center`.
    Center,
    /// `right`.
    Right,
}

impl TextAlign {
    /// CSS keyword.
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Horizontal alignment inside a full-width, padded text box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HorizontalPlacement {
    /// Text alignment.
    pub align: TextAlign,
    /// Padding applied on both sides, CSS px.
    pub padding_px: u32,
}

/// Placement of the text box, one independent choice per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LayerPosition {
    /// Vertical placement.
    pub vertical: VerticalPlacement,
    /// Horizontal placement.
    pub horizontal: HorizontalPlacement,
}

impl LayerPosition {
    /// Utility classes, e.g. `bottom-12 text-center px-12`.
    pub fn class_list(&self) -> String {
        let vertical = match self.vertical {
            VerticalPlacement::FromTop { .. } => "top-12",
            VerticalPlacement::Centered => "top-1/2 -translate-y-1/2",
            VerticalPlacement::FromBottom { .. } => "bottom-12",
        };
        format!("{vertical} text-{} px-12", self.horizontal.align.css())
    }

    /// Equivalent CSS declarations for an absolutely positioned, full-width box.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = match self.vertical {
            VerticalPlacement::FromTop { offset_px } => vec![("top", format!("{offset_px}px"))],
            VerticalPlacement::Centered => vec![
                ("top", "50%".to_string()),
                ("transform", "translateY(-50%)".to_string()),
            ],
            VerticalPlacement::FromBottom { offset_px } => {
                vec![("bottom", format!("{offset_px}px"))]
            }
        };
        let pad = format!("{}px", self.horizontal.padding_px);
        out.push(("text-align", self.horizontal.align.css().to_string()));
        out.push(("padding-left", pad.clone()));
        out.push(("padding-right", pad));
        out
    }

    /// Inline `style` attribute body.
    pub fn to_inline_css(&self) -> String {
        inline_css(&self.declarations())
    }

    /// Top edge of a text box of `box_height` inside a region of `region_height`, CSS px.
    pub fn box_top(&self, region_height: f64, box_height: f64) -> f64 {
        match self.vertical {
            VerticalPlacement::FromTop { offset_px } => f64::from(offset_px),
            VerticalPlacement::Centered => region_height / 2.0 - box_height / 2.0,
            VerticalPlacement::FromBottom { offset_px } => {
                region_height - f64::from(offset_px) - box_height
            }
        }
    }

    /// X coordinate the text is anchored to and the matching SVG `text-anchor`.
    pub fn anchor_x(&self, region_width: f64) -> (f64, &'static str) {
        let pad = f64::from(self.horizontal.padding_px);
        match self.horizontal.align {
            TextAlign::Left => (pad, "start"),
            TextAlign::Center => (region_width / 2.0, "middle"),
            TextAlign::Right => (region_width - pad, "end"),
        }
    }
}

fn vertical_placement(v: VerticalAnchor) -> VerticalPlacement {
    match v {
        VerticalAnchor::Top => VerticalPlacement::FromTop {
            offset_px: EDGE_OFFSET_PX,
        },
        VerticalAnchor::Center => VerticalPlacement::Centered,
        VerticalAnchor::Bottom => VerticalPlacement::FromBottom {
            offset_px: EDGE_OFFSET_PX,
        },
    }
}

fn horizontal_placement(h: HorizontalAnchor) -> HorizontalPlacement {
    let align = match h {
        HorizontalAnchor::Left => TextAlign::Left,
        HorizontalAnchor::Center => TextAlign::Center,
        HorizontalAnchor::Right => TextAlign::Right,
    };
    HorizontalPlacement {
        align,
        padding_px: HORIZONTAL_PADDING_PX,
    }
}

/// Combine the two anchors into a placement. Pure and total.
pub fn compute_layer_position(
    vertical: VerticalAnchor,
    horizontal: HorizontalAnchor,
) -> LayerPosition {
    LayerPosition {
        vertical: vertical_placement(vertical),
        horizontal: horizontal_placement(horizontal),
    }
}

/// Direction of a vertical linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// First stop at the top edge.
    ToBottom,
    /// First stop at the bottom edge.
    ToTop,
}

/// Color stop at `offset` in `[0, 1]` along the gradient direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient.
    pub offset: f32,
    /// Color at this position.
    pub color: Color,
}

/// Darkening layer between the background and the text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// Vertical linear gradient.
    Gradient {
        /// Direction of the first stop.
        direction: GradientDirection,
        /// Stops in increasing offset order.
        stops: Vec<GradientStop>,
    },
    /// Uniform fill.
    Flat {
        /// Fill color.
        color: Color,
    },
}

const SCRIM: Color = Color::rgba(0, 0, 0, 0.6);
const VEIL: Color = Color::rgba(0, 0, 0, 0.3);
const CLEAR: Color = Color::TRANSPARENT;

fn scrim_stops() -> Vec<GradientStop> {
    vec![
        GradientStop {
            offset: 0.0,
            color: SCRIM,
        },
        GradientStop {
            offset: 0.5,
            color: CLEAR,
        },
        GradientStop {
            offset: 1.0,
            color: CLEAR,
        },
    ]
}

impl Overlay {
    /// Utility classes of the overlay element.
    pub fn class_list(&self) -> String {
        match self {
            Self::Gradient { direction, .. } => {
                let dir = match direction {
                    GradientDirection::ToBottom => "b",
                    GradientDirection::ToTop => "t",
                };
                format!("bg-gradient-to-{dir} from-black/60 via-transparent to-transparent")
            }
            Self::Flat { .. } => "bg-black/30".to_string(),
        }
    }

    /// CSS `background` value.
    pub fn css(&self) -> String {
        match self {
            Self::Gradient { direction, stops } => {
                let dir = match direction {
                    GradientDirection::ToBottom => "to bottom",
                    GradientDirection::ToTop => "to top",
                };
                let stops = stops
                    .iter()
                    .map(|s| format!("{} {}%", s.color.css(), s.offset * 100.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("linear-gradient({dir}, {stops})")
            }
            Self::Flat { color } => color.css(),
        }
    }

    /// Overlay color at vertical position `y` (0 = top edge, 1 = bottom edge).
    pub fn sample(&self, y: f32) -> Color {
        let y = y.clamp(0.0, 1.0);
        match self {
            Self::Flat { color } => *color,
            Self::Gradient { direction, stops } => {
                let t = match direction {
                    GradientDirection::ToBottom => y,
                    GradientDirection::ToTop => 1.0 - y,
                };
                sample_stops(stops, t)
            }
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let k = (t - a.offset) / span;
            let lerp =
                |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * k).round() as u8;
            return Color::rgba(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                a.color.alpha + (b.color.alpha - a.color.alpha) * k,
            );
        }
    }
    stops[stops.len() - 1].color
}

/// Overlay that keeps anchored text legible. Depends on the vertical anchor only.
pub fn compute_overlay_gradient(vertical: VerticalAnchor) -> Overlay {
    match vertical {
        VerticalAnchor::Top => Overlay::Gradient {
            direction: GradientDirection::ToBottom,
            stops: scrim_stops(),
        },
        VerticalAnchor::Center => Overlay::Flat { color: VEIL },
        VerticalAnchor::Bottom => Overlay::Gradient {
            direction: GradientDirection::ToTop,
            stops: scrim_stops(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/layout.rs"]
mod tests;
