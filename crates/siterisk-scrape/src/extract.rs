//! Strategy-driven field extraction with regex fallbacks and whole-set
//! schema validation.

use std::collections::HashMap;

use regex::Regex;
use scraper::Html;

use crate::error::ScrapeError;
use crate::strategy::{run_strategy, Strategy};

/// A typed value extracted from markup.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FieldValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => {
                #[allow(clippy::cast_precision_loss)]
                Some(*n as f64)
            }
            FieldValue::Float(x) => Some(*x),
            FieldValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// How to locate, convert and validate one output field of a page source.
pub struct FieldSpec {
    pub name: &'static str,
    /// Strategies tried in declared order; first non-empty text wins.
    pub strategies: Vec<Strategy>,
    /// Regex patterns over the raw markup, tried in order only when every
    /// strategy yields nothing. The first capture group is the value.
    pub fallback_patterns: Vec<&'static str>,
    pub convert: fn(&str) -> Option<FieldValue>,
    /// Whole-set validation: a missing required field rejects the source.
    pub required: bool,
    /// Inclusive numeric bounds; a converted value outside them rejects the
    /// whole field set.
    pub range: Option<(f64, f64)>,
}

/// Extract and validate the declared fields of one page source.
///
/// Per field: strategies in declared order (selector order within each),
/// then regex fallbacks over the full markup, then the field's converter.
/// The converted set is validated as a whole — on any missing required
/// field or out-of-range value, the entire set is rejected so partial but
/// invalid results never propagate.
///
/// # Errors
///
/// Returns [`ScrapeError::SchemaValidation`] when the converted field set
/// fails validation.
pub fn extract_fields(
    markup: &str,
    specs: &[FieldSpec],
    source_id: &str,
) -> Result<HashMap<&'static str, FieldValue>, ScrapeError> {
    let doc = Html::parse_document(markup);
    let mut fields: HashMap<&'static str, FieldValue> = HashMap::new();

    for spec in specs {
        let raw = spec
            .strategies
            .iter()
            .find_map(|strategy| run_strategy(&doc, strategy))
            .or_else(|| run_fallbacks(markup, &spec.fallback_patterns));

        let Some(raw) = raw else {
            tracing::debug!(source = source_id, field = spec.name, "field not found");
            continue;
        };

        match (spec.convert)(&raw) {
            Some(value) => {
                fields.insert(spec.name, value);
            }
            None => {
                tracing::debug!(
                    source = source_id,
                    field = spec.name,
                    raw,
                    "converter produced no value"
                );
            }
        }
    }

    validate_fields(&fields, specs, source_id)?;
    Ok(fields)
}

fn run_fallbacks(markup: &str, patterns: &[&'static str]) -> Option<String> {
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(cap) = re.captures(markup) {
            if let Some(m) = cap.get(1) {
                let text = m.as_str().trim();
                if !text.is_empty() {
                    tracing::debug!(pattern, "fallback pattern matched");
                    return Some(text.to_owned());
                }
            }
        }
    }
    None
}

fn validate_fields(
    fields: &HashMap<&'static str, FieldValue>,
    specs: &[FieldSpec],
    source_id: &str,
) -> Result<(), ScrapeError> {
    for spec in specs {
        match fields.get(spec.name) {
            None => {
                if spec.required {
                    return Err(ScrapeError::SchemaValidation {
                        source_id: source_id.to_owned(),
                        reason: format!("required field '{}' is missing", spec.name),
                    });
                }
            }
            Some(value) => {
                if let Some((min, max)) = spec.range {
                    let Some(number) = value.as_f64() else {
                        return Err(ScrapeError::SchemaValidation {
                            source_id: source_id.to_owned(),
                            reason: format!(
                                "field '{}' declares a range but is not numeric",
                                spec.name
                            ),
                        });
                    };
                    if !(min..=max).contains(&number) {
                        return Err(ScrapeError::SchemaValidation {
                            source_id: source_id.to_owned(),
                            reason: format!(
                                "field '{}' value {number} outside [{min}, {max}]",
                                spec.name
                            ),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
