//! Loose value coercion
//!
//! The attendance service sends numbers either as JSON numbers or as their
//! string equivalents. Every numeric field goes through these helpers; each
//! returns `None` on failure so the caller applies its own default.

use serde_json::{Map, Value};

/// Coerce a number or numeric string to a finite float.
///
/// Strings are trimmed and may carry one trailing `%`. Anything else
/// (null, bool, arrays, objects, non-numeric or non-finite text) is `None`.
pub fn to_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Coerce to a non-negative whole count, truncating any fractional part
pub fn to_count(value: Option<&Value>) -> Option<u32> {
    let n = to_f64(value)?.trunc();
    if n < 0.0 || n > u32::MAX as f64 {
        return None;
    }
    Some(n as u32)
}

/// Coerce a value to display text; numbers render as their JSON text
pub fn to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Round half up to the nearest integer (`2.5 -> 3`, `-2.5 -> -2`)
pub fn round_half_up(x: f64) -> f64 {
    // `x - floor` is exact; `x + 0.5` is not for values just below a half
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounded `100 * part / whole`; `whole` must be non-zero
pub fn rounded_percentage(part: u32, whole: u32) -> f64 {
    round_half_up(100.0 * part as f64 / whole as f64)
}

/// Clamp a percentage into `[0, 100]`
pub fn clamp_percentage(pct: f64) -> f64 {
    pct.clamp(0.0, 100.0)
}

/// First alias holding non-empty text (or a number rendered as text)
pub fn first_text(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|key| to_text(obj.get(*key)).filter(|s| !s.is_empty()))
}

/// First alias whose value coerces to a non-zero float.
///
/// A zero counts as absent, so `{"totalclasses": 0, "totalClasses": 10}`
/// resolves to the camelCase value.
pub fn first_f64(obj: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|key| to_f64(obj.get(*key)).filter(|v| *v != 0.0))
}

/// First alias whose value coerces to a non-zero count
pub fn first_count(obj: &Map<String, Value>, aliases: &[&str]) -> Option<u32> {
    aliases
        .iter()
        .find_map(|key| to_count(obj.get(*key)).filter(|n| *n > 0))
}
