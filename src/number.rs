//! Numeric helpers shared by the style readers and the record serializers.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serializer;

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static pattern")
    })
}

/// Read the leading number out of a CSS value (`"16px"` -> 16, `"1.5em"` -> 1.5).
///
/// Trailing units are ignored; anything without a numeric prefix is `None`.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let m = float_prefix().find(value)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to `digits` decimal places, half away from zero.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let rounded = (value * scale).round() / scale;
    // avoid emitting -0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Serialize an `f64` the way the design tool writes numbers: integral values
/// carry no fractional part.
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
