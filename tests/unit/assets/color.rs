use super::*;

#[test]
fn parses_all_hex_lengths() {
    assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Color::WHITE);
    assert_eq!(parse_hex_color("#fff").unwrap(), Color::WHITE);
    assert_eq!(parse_hex_color("#ff000080").unwrap().r, 255);
    assert!((parse_hex_color("#ff000080").unwrap().alpha - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(parse_hex_color("#0f08").unwrap().g, 0xff);
    assert_eq!(parse_hex_color(" #1a2B3c ").unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
}

#[test]
fn rejects_malformed_hex() {
    assert!(parse_hex_color("FFFFFF").is_err());
    assert!(parse_hex_color("#GGGGGG").is_err());
    assert!(parse_hex_color("#12345").is_err());
    assert!(parse_hex_color("#").is_err());
    assert!(parse_hex_color("red").is_err());
}

#[test]
fn unrenderable_text_color_degrades_to_white() {
    assert_eq!(resolve_text_color("not-a-color"), Color::WHITE);
    assert_eq!(resolve_text_color(""), Color::WHITE);
    assert_eq!(resolve_text_color("#000000"), Color::BLACK);
}
