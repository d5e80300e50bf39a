//! Value converters for extracted field text.
//!
//! A converter turns the raw text a strategy (or regex fallback) produced
//! into a typed [`FieldValue`], or `None` when the text holds no parseable
//! value. Converters never trigger fallbacks themselves — deciding what to
//! try next is the extraction engine's job.

use crate::extract::FieldValue;

/// Trimmed, whitespace-collapsed text. `None` for empty input.
#[must_use]
pub fn parse_text(raw: &str) -> Option<FieldValue> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(FieldValue::Text(text))
    }
}

/// First plausible 4-digit year in the text (1800–2100), not part of a
/// longer digit run.
#[must_use]
pub fn parse_year(raw: &str) -> Option<FieldValue> {
    let bytes = raw.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start == 4 {
                if let Ok(year) = raw[start..i].parse::<i64>() {
                    if (1800..=2100).contains(&year) {
                        return Some(FieldValue::Int(year));
                    }
                }
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Land/lot area in square meters.
///
/// Recognizes (case-insensitive, optional space before the unit):
/// - square meters: `"650 m²"`, `"650m2"`, `"650 sqm"`, `"650 sq m"`
/// - hectares: `"1.2 ha"`, `"1.2 hectares"` — converted to m².
///
/// Numbers may carry thousands separators (`"1,012 m²"`).
#[must_use]
pub fn parse_area_sqm(raw: &str) -> Option<FieldValue> {
    let lower = raw.to_lowercase();
    let (value, unit_at) = first_number(&lower)?;
    let rest = lower[unit_at..].trim_start();

    for unit in ["m²", "m2", "sq m", "sqm"] {
        if rest.starts_with(unit) {
            return Some(FieldValue::Float(value));
        }
    }
    for unit in ["hectares", "hectare", "ha"] {
        if rest.starts_with(unit) {
            return Some(FieldValue::Float(value * 10_000.0));
        }
    }
    None
}

/// First integer in the text, thousands separators allowed
/// (`"Population: 5,432"` → 5432).
#[must_use]
pub fn parse_count(raw: &str) -> Option<FieldValue> {
    let (value, _) = first_number(raw)?;
    if value.fract() != 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(FieldValue::Int(value as i64))
}

/// Scans for the first number (digits with optional thousands commas and one
/// decimal point). Returns the parsed value and the byte offset just past it.
fn first_number(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit() {
            let start = i;
            let mut has_dot = false;
            while i < len {
                if bytes[i].is_ascii_digit() {
                    i += 1;
                } else if bytes[i] == b'.' && !has_dot && i + 1 < len && bytes[i + 1].is_ascii_digit()
                {
                    has_dot = true;
                    i += 1;
                } else if bytes[i] == b',' && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                    i += 1;
                } else {
                    break;
                }
            }
            let cleaned: String = s[start..i].chars().filter(|&c| c != ',').collect();
            if let Ok(value) = cleaned.parse::<f64>() {
                return Some((value, i));
            }
        } else {
            i += 1;
        }
    }
    None
}
