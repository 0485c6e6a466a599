//! CSS color strings to unit-range RGBA records.
//!
//! Only the `rgb()` / `rgba()` functional notation is decoded, which is what
//! computed styles report. Keyword and hex colors are not decoded and come
//! back as opaque white.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::number::{self, parse_leading_float};

/// A color with every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "color")]
pub struct Color {
    #[serde(serialize_with = "number::serialize")]
    pub alpha: f64,
    #[serde(serialize_with = "number::serialize")]
    pub red: f64,
    #[serde(serialize_with = "number::serialize")]
    pub green: f64,
    #[serde(serialize_with = "number::serialize")]
    pub blue: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

fn functional_notation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rgba?\(([^)]+)\)").expect("static pattern"))
}

/// Parse a computed color value.
///
/// - absent or empty input gives `None`; the caller picks its own fallback
/// - input without `rgb(...)`/`rgba(...)` gives opaque white
/// - the first three components are 8-bit channels, the fourth is alpha
/// - a channel that is present but not numeric becomes 0, a non-numeric
///   alpha becomes 1, a component missing from a short list becomes 1
pub fn parse_color(value: Option<&str>) -> Option<Color> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let Some(caps) = functional_notation().captures(value) else {
        log::trace!("color {:?} is not functional notation, using white", value);
        return Some(Color::WHITE);
    };

    let parts: Vec<Option<f64>> = caps[1]
        .split(',')
        .map(|part| parse_leading_float(part.trim()))
        .collect();

    let channel = |i: usize| match parts.get(i) {
        None => 1.0,
        Some(Some(v)) => v / 255.0,
        Some(None) => 0.0,
    };
    let alpha = match parts.get(3) {
        Some(Some(a)) => *a,
        _ => 1.0,
    };

    Some(Color::new(channel(0), channel(1), channel(2), alpha))
}

/// Parse with a call-site fallback for absent input.
pub fn parse_color_or(value: Option<&str>, fallback: Color) -> Color {
    parse_color(value).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(
            parse_color(Some("rgb(255, 0, 0)")),
            Some(Color::new(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(
            parse_color(Some("RGBA(0, 0, 255, 0.5)")),
            Some(Color::new(0.0, 0.0, 1.0, 0.5))
        );
        assert_eq!(
            parse_color(Some("  rgba(51,102,153,0)  ")),
            Some(Color::new(0.2, 0.4, 0.6, 0.0))
        );
    }

    #[test]
    fn absent_input_is_none() {
        assert_eq!(parse_color(None), None);
        assert_eq!(parse_color(Some("")), None);
        assert_eq!(parse_color(Some("   ")), None);
    }

    #[test]
    fn keywords_fall_back_to_opaque_white() {
        assert_eq!(parse_color(Some("red")), Some(Color::WHITE));
        assert_eq!(parse_color(Some("#ff0000")), Some(Color::WHITE));
        assert_eq!(parse_color(Some("transparent")), Some(Color::WHITE));
    }

    #[test]
    fn non_numeric_components_default_independently() {
        let c = parse_color(Some("rgba(x, 255, y, z)")).unwrap();
        assert_eq!(c, Color::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn short_component_lists_fill_with_one() {
        let c = parse_color(Some("rgb(0)")).unwrap();
        assert_eq!(c, Color::new(0.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn first_color_of_a_multi_value_border_wins() {
        let c = parse_color(Some("rgb(0, 255, 0) rgb(255, 0, 0)")).unwrap();
        assert_eq!(c, Color::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn fallback_only_applies_to_absent_values() {
        let clear = Color::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(parse_color_or(None, clear), clear);
        assert_eq!(parse_color_or(Some("blue"), clear), Color::WHITE);
    }

    #[test]
    fn serializes_with_class_tag() {
        let json = serde_json::to_value(Color::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"_class": "color", "alpha": 1, "red": 1, "green": 0, "blue": 0})
        );
    }
}
