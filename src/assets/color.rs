use crate::foundation::core::Color;

/// Parse a CSS hex color: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (case-insensitive).
///
/// The leading `#` is required, as in CSS.
pub fn parse_hex_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| format!("hex color must start with '#': \"{s}\""))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digits in \"{s}\""));
    }

    fn nibble(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => c - b'A' + 10,
        }
    }
    let d = digits.as_bytes();
    let short = |i: usize| nibble(d[i]) * 17;
    let long = |i: usize| nibble(d[i]) * 16 + nibble(d[i + 1]);

    let (r, g, b, a) = match d.len() {
        3 => (short(0), short(1), short(2), 255),
        4 => (short(0), short(1), short(2), short(3)),
        6 => (long(0), long(2), long(4), 255),
        8 => (long(0), long(2), long(4), long(6)),
        _ => {
            return Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(Color::rgba(r, g, b, f32::from(a) / 255.0))
}

/// Resolve the free-form text color field into something paintable.
///
/// Strings that are not hex colors fall back to white, the heading's inherited color, and
/// produce no error.
pub fn resolve_text_color(raw: &str) -> Color {
    match parse_hex_color(raw) {
        Ok(c) => c,
        Err(reason) => {
            tracing::debug!(color = raw, %reason, "text color not renderable, using white");
            Color::WHITE
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
