use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest text size the size control produces.
pub const FONT_SIZE_MIN_PX: u32 = 16;
/// Largest text size the size control produces.
pub const FONT_SIZE_MAX_PX: u32 = 72;
/// Rotation lower bound in degrees.
pub const ROTATION_MIN_DEG: i32 = -180;
/// Rotation upper bound in degrees.
pub const ROTATION_MAX_DEG: i32 = 180;

/// Typeface offered for the text layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// Apple system font.
    #[default]
    #[serde(alias = "SF Pro Display", alias = "-apple-system")]
    SfProDisplay,
    /// Inter.
    #[serde(alias = "Inter")]
    Inter,
    /// Playfair Display (serif).
    #[serde(alias = "Playfair Display", alias = "'Playfair Display'")]
    PlayfairDisplay,
    /// Montserrat.
    #[serde(alias = "Montserrat")]
    Montserrat,
    /// Roboto.
    #[serde(alias = "Roboto")]
    Roboto,
}

impl FontFamily {
    /// Every family in picker order.
    pub const ALL: [Self; 5] = [
        Self::SfProDisplay,
        Self::Inter,
        Self::PlayfairDisplay,
        Self::Montserrat,
        Self::Roboto,
    ];

    /// Human-readable name shown in pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::SfProDisplay => "SF Pro Display",
            Self::Inter => "Inter",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Montserrat => "Montserrat",
            Self::Roboto => "Roboto",
        }
    }

    /// Value of the CSS `font-family` property for the text layer.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::SfProDisplay => "-apple-system",
            Self::Inter => "Inter",
            Self::PlayfairDisplay => "'Playfair Display'",
            Self::Montserrat => "Montserrat",
            Self::Roboto => "Roboto",
        }
    }

    /// Family list used by the rasterizer, ending with a generic fallback.
    pub fn render_stack(self) -> &'static str {
        match self {
            Self::SfProDisplay => "'SF Pro Display', 'Helvetica Neue', Arial, sans-serif",
            Self::Inter => "Inter, sans-serif",
            Self::PlayfairDisplay => "'Playfair Display', serif",
            Self::Montserrat => "Montserrat, sans-serif",
            Self::Roboto => "Roboto, sans-serif",
        }
    }

    /// Stable identifier (`sf-pro-display`, `inter`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::SfProDisplay => "sf-pro-display",
            Self::Inter => "inter",
            Self::PlayfairDisplay => "playfair-display",
            Self::Montserrat => "montserrat",
            Self::Roboto => "roboto",
        }
    }
}

/// Vertical text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAnchor {
    /// Fixed offset from the top edge.
    Top,
    /// Vertically centred.
    Center,
    /// Fixed offset from the bottom edge.
    #[default]
    Bottom,
}

impl VerticalAnchor {
    /// Every anchor, top to bottom.
    pub const ALL: [Self; 3] = [Self::Top, Self::Center, Self::Bottom];
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalAnchor {
    /// Left-aligned.
    Left,
    /// Centred.
    #[default]
    Center,
    /// Right-aligned.
    Right,
}

impl HorizontalAnchor {
    /// Every anchor, left to right.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];
}

/// Named shadow/outline treatment for the text layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEffect {
    /// No shadow.
    #[default]
    None,
    /// Soft drop shadow.
    ShadowSm,
    /// Medium drop shadow.
    ShadowMd,
    /// Strong drop shadow.
    ShadowLg,
    /// 1px white outline.
    #[serde(alias = "text-stroke-light")]
    OutlineLight,
    /// 1px black outline.
    #[serde(alias = "text-stroke-dark")]
    OutlineDark,
}

impl TextEffect {
    /// Every effect in picker order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::ShadowSm,
        Self::ShadowMd,
        Self::ShadowLg,
        Self::OutlineLight,
        Self::OutlineDark,
    ];

    /// Human-readable name shown in pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ShadowSm => "Soft shadow",
            Self::ShadowMd => "Medium shadow",
            Self::ShadowLg => "Strong shadow",
            Self::OutlineLight => "White outline",
            Self::OutlineDark => "Black outline",
        }
    }

    /// Stable identifier (`shadow-md`, `outline-light`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ShadowSm => "shadow-sm",
            Self::ShadowMd => "shadow-md",
            Self::ShadowLg => "shadow-lg",
            Self::OutlineLight => "outline-light",
            Self::OutlineDark => "outline-dark",
        }
    }
}

fn normalize_choice(s: &str) -> String {
    s.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_ascii_lowercase()
        .replace([' ', '_'], "-")
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = normalize_choice(s);
        if norm == "-apple-system" {
            return Ok(Self::SfProDisplay);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.id() == norm)
            .ok_or_else(|| format!("unknown font \"{s}\""))
    }
}

impl FromStr for VerticalAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "top" => Ok(Self::Top),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => Err(format!("unknown vertical anchor \"{s}\"")),
        }
    }
}

impl FromStr for HorizontalAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(format!("unknown horizontal anchor \"{s}\"")),
        }
    }
}

impl FromStr for TextEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = normalize_choice(s);
        let norm = match norm.as_str() {
            "text-stroke-light" => "outline-light",
            "text-stroke-dark" => "outline-dark",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|e| e.id() == norm)
            .ok_or_else(|| format!("unknown text effect \"{s}\""))
    }
}

/// The full, flat parameter set that determines a cover.
///
/// Nothing outside this record (and the background image held next to it) affects the render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositionParameters {
    /// Text content, any length.
    pub text: String,
    /// Text size in CSS pixels, `[16, 72]`.
    pub font_size_px: u32,
    /// Typeface.
    pub font_family: FontFamily,
    /// Vertical anchor.
    pub vertical_anchor: VerticalAnchor,
    /// Horizontal anchor.
    pub horizontal_anchor: HorizontalAnchor,
    /// Shadow/outline treatment.
    pub text_effect: TextEffect,
    /// Clockwise rotation in degrees, `[-180, 180]`.
    pub rotation_deg: i32,
    /// Text color as typed by the user; not validated.
    pub text_color: String,
}

impl Default for CompositionParameters {
    fn default() -> Self {
        Self {
            text: "My Playlist".to_string(),
            font_size_px: 31,
            font_family: FontFamily::default(),
            vertical_anchor: VerticalAnchor::default(),
            horizontal_anchor: HorizontalAnchor::default(),
            text_effect: TextEffect::default(),
            rotation_deg: 0,
            text_color: "#FFFFFF".to_string(),
        }
    }
}

/// One user edit, applied in the order issued.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamEdit {
    /// Replace the text.
    Text(String),
    /// Set the text size; clamped to `[16, 72]`.
    FontSize(i64),
    /// Pick a typeface.
    FontFamily(FontFamily),
    /// Pick the vertical anchor.
    VerticalAnchor(VerticalAnchor),
    /// Pick the horizontal anchor.
    HorizontalAnchor(HorizontalAnchor),
    /// Pick a text effect.
    TextEffect(TextEffect),
    /// Set rotation; clamped to `[-180, 180]`.
    Rotation(i64),
    /// Put rotation back to 0.
    ResetRotation,
    /// Replace the text color string.
    TextColor(String),
}

impl CompositionParameters {
    /// Set text size, clamping into `[16, 72]`.
    pub fn set_font_size_px(&mut self, px: i64) {
        self.font_size_px = clamp_font_size(px);
    }

    /// Set rotation, clamping into `[-180, 180]`.
    pub fn set_rotation_deg(&mut self, deg: i64) {
        self.rotation_deg = clamp_rotation(deg);
    }

    /// Apply a single edit.
    pub fn apply(&mut self, edit: ParamEdit) {
        match edit {
            ParamEdit::Text(t) => self.text = t,
            ParamEdit::FontSize(px) => self.set_font_size_px(px),
            ParamEdit::FontFamily(f) => self.font_family = f,
            ParamEdit::VerticalAnchor(v) => self.vertical_anchor = v,
            ParamEdit::HorizontalAnchor(h) => self.horizontal_anchor = h,
            ParamEdit::TextEffect(e) => self.text_effect = e,
            ParamEdit::Rotation(deg) => self.set_rotation_deg(deg),
            ParamEdit::ResetRotation => self.rotation_deg = 0,
            ParamEdit::TextColor(c) => self.text_color = c,
        }
    }

    /// Copy with every numeric field forced into its domain.
    pub fn clamped(&self) -> Self {
        Self {
            font_size_px: clamp_font_size(i64::from(self.font_size_px)),
            rotation_deg: clamp_rotation(i64::from(self.rotation_deg)),
            ..self.clone()
        }
    }
}

pub(crate) fn clamp_font_size(px: i64) -> u32 {
    px.clamp(i64::from(FONT_SIZE_MIN_PX), i64::from(FONT_SIZE_MAX_PX)) as u32
}

pub(crate) fn clamp_rotation(deg: i64) -> i32 {
    deg.clamp(i64::from(ROTATION_MIN_DEG), i64::from(ROTATION_MAX_DEG)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/composition/params.rs"]
mod tests;
