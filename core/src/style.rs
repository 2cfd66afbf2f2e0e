//! Report styling options.
//!
//! Colors are stored as user-entered hex strings and normalized at export
//! time by [`safe_color`]; malformed input degrades to white rather than
//! failing the export.

use serde::{Deserialize, Serialize};

/// Visual options for exported reports. Every field has a default so a
/// partially-populated settings file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub header_font: String,
    pub header_font_size: f64,
    pub header_font_color: String,
    pub header_fill: String,
    /// Border thickness 0-3: none, thin, medium, thick.
    pub header_border: u8,
    pub header_border_color: String,
    pub header_row_height: f64,

    pub body_font: String,
    pub body_font_size: f64,
    pub body_font_color: String,
    pub body_fill: String,
    pub body_border: u8,
    pub body_border_color: String,
    pub body_row_height: f64,

    pub full_match_fill: String,
    pub partial_match_fill: String,
    pub no_match_fill: String,

    /// Extra characters added to autofitted column widths.
    pub autofit_padding: f64,
}

impl Default for StyleOptions {
    fn default() -> StyleOptions {
        StyleOptions {
            header_font: "Segoe UI".to_string(),
            header_font_size: 13.0,
            header_font_color: "#222222".to_string(),
            header_fill: "#f5f1e3".to_string(),
            header_border: 2,
            header_border_color: "#333333".to_string(),
            header_row_height: 24.0,

            body_font: "Segoe UI".to_string(),
            body_font_size: 12.0,
            body_font_color: "#222222".to_string(),
            body_fill: "#ffffff".to_string(),
            body_border: 1,
            body_border_color: "#aaaaaa".to_string(),
            body_row_height: 18.0,

            full_match_fill: "#c6efce".to_string(),
            partial_match_fill: "#fff2cc".to_string(),
            no_match_fill: "#ffffff".to_string(),

            autofit_padding: 2.0,
        }
    }
}

/// Normalize a hex color to a packed `0xRRGGBB` value. Accepts `#RRGGBB`,
/// `RRGGBB`, and 8-digit `AARRGGBB` (the alpha byte is dropped). Anything
/// else falls back to white.
pub fn safe_color(input: &str) -> u32 {
    const WHITE: u32 = 0xFFFFFF;
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return WHITE;
    }
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).unwrap_or(WHITE),
        8 => u32::from_str_radix(&hex[2..], 16).unwrap_or(WHITE),
        _ => WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_color_accepts_common_forms() {
        assert_eq!(safe_color("#c6efce"), 0xC6EFCE);
        assert_eq!(safe_color("C6EFCE"), 0xC6EFCE);
        assert_eq!(safe_color("FF333333"), 0x333333);
        assert_eq!(safe_color("  #fff2cc "), 0xFFF2CC);
    }

    #[test]
    fn safe_color_falls_back_to_white() {
        assert_eq!(safe_color(""), 0xFFFFFF);
        assert_eq!(safe_color("#12"), 0xFFFFFF);
        assert_eq!(safe_color("not-a-color"), 0xFFFFFF);
        assert_eq!(safe_color("12345"), 0xFFFFFF);
    }

    #[test]
    fn defaults_survive_partial_json() {
        let opts: StyleOptions = serde_json::from_str(r#"{"header_font":"Arial"}"#).unwrap();
        assert_eq!(opts.header_font, "Arial");
        assert_eq!(opts.body_font_size, 12.0);
        assert_eq!(opts.full_match_fill, "#c6efce");
    }
}
