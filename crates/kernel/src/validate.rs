//! The rule-evaluation boundary.
//!
//! Forms hand the processor a mapping of field name → rule tokens; a
//! [`RuleEngine`] evaluates those tokens against submitted data and returns
//! per-field error messages. The engine is a synchronous, opaque
//! collaborator — deployments embedding a host framework's validator
//! implement the trait; [`TokenRuleEngine`] is the built-in implementation
//! covering the tokens the field builders emit.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::form::SubmissionData;

/// Field name → ordered rule tokens.
pub type RuleSet = BTreeMap<String, Vec<String>>;

/// Field name → error messages. Empty means the data passed.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Evaluates rule tokens against submitted data.
pub trait RuleEngine: Send + Sync {
    /// Validate `data` against `rules`. `messages` overrides the default
    /// error text, keyed `field.rule` or `rule`.
    fn evaluate(
        &self,
        rules: &RuleSet,
        data: &SubmissionData,
        messages: &BTreeMap<String, String>,
    ) -> ValidationErrors;
}

// Pattern is a literal; compilation cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Built-in rule engine interpreting string rule tokens.
///
/// Unknown tokens are skipped so forms can carry tokens aimed at an
/// external validator without tripping this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenRuleEngine;

impl TokenRuleEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl RuleEngine for TokenRuleEngine {
    fn evaluate(
        &self,
        rules: &RuleSet,
        data: &SubmissionData,
        messages: &BTreeMap<String, String>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (field, tokens) in rules {
            let value = data.get(field);
            let blank = is_blank(value);
            // Size rules measure numeric strings by value only when the
            // field is declared numeric; otherwise strings measure by
            // length.
            let numeric = tokens
                .iter()
                .any(|token| token == "numeric" || token == "integer");

            for token in tokens {
                let (name, arg) = match token.split_once(':') {
                    Some((name, arg)) => (name, Some(arg)),
                    None => (token.as_str(), None),
                };

                let failure = if name == "required" {
                    blank.then(|| format!("The {field} field is required."))
                } else if blank {
                    // Non-required rules only apply to present values.
                    None
                } else {
                    match value {
                        Some(value) => check(field, name, arg, value, numeric),
                        None => None,
                    }
                };

                if let Some(default_message) = failure {
                    let message = messages
                        .get(&format!("{field}.{name}"))
                        .or_else(|| messages.get(name))
                        .cloned()
                        .unwrap_or(default_message);
                    errors.entry(field.clone()).or_default().push(message);
                }
            }
        }

        errors
    }
}

/// Check one token against a present value; returns the default error
/// message on failure. `numeric` marks a field whose token list declares it
/// numeric, switching size rules from length to value for strings.
fn check(
    field: &str,
    name: &str,
    arg: Option<&str>,
    value: &Value,
    numeric: bool,
) -> Option<String> {
    match name {
        "email" => (!value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)))
            .then(|| format!("The {field} must be a valid email address.")),

        "string" => (!value.is_string()).then(|| format!("The {field} must be a string.")),

        "numeric" => as_number(value)
            .is_none()
            .then(|| format!("The {field} must be a number.")),

        "integer" => (!is_integer(value)).then(|| format!("The {field} must be an integer.")),

        "boolean" => (!is_boolean(value)).then(|| format!("The {field} must be true or false.")),

        "accepted" => (!is_accepted(value)).then(|| format!("The {field} must be accepted.")),

        "date" => as_date(value)
            .is_none()
            .then(|| format!("The {field} is not a valid date.")),

        "in" => {
            let allowed = arg.unwrap_or("");
            let candidate = comparable(value);
            (!allowed.split(',').any(|option| option == candidate))
                .then(|| format!("The selected {field} is invalid."))
        }

        "min" => {
            let min: f64 = arg.and_then(|a| a.parse().ok())?;
            match size_of(value, numeric) {
                Some(size) if size >= min => None,
                // Unmeasurable values cannot satisfy a size rule.
                _ => Some(format!("The {field} must be at least {min}.")),
            }
        }

        "max" => {
            let max: f64 = arg.and_then(|a| a.parse().ok())?;
            match size_of(value, numeric) {
                Some(size) if size <= max => None,
                _ => Some(format!("The {field} may not be greater than {max}.")),
            }
        }

        "between" => {
            let (low, high) = arg.and_then(|a| a.split_once(','))?;
            let low: f64 = low.parse().ok()?;
            let high: f64 = high.parse().ok()?;
            match size_of(value, numeric) {
                Some(size) if size >= low && size <= high => None,
                _ => Some(format!("The {field} must be between {low} and {high}.")),
            }
        }

        "decimal" => {
            let arg = arg?;
            let (low, high) = match arg.split_once(',') {
                Some((low, high)) => (low.parse().ok()?, high.parse().ok()?),
                None => {
                    let exact: usize = arg.parse().ok()?;
                    (exact, exact)
                }
            };
            let places = decimal_places(value)?;
            (places < low || places > high).then(|| {
                format!("The {field} must have between {low} and {high} decimal places.")
            })
        }

        "after" => {
            let bound = arg.and_then(parse_date_str)?;
            (!as_date(value).is_some_and(|date| date > bound))
                .then(|| format!("The {field} must be a date after {}.", arg.unwrap_or("")))
        }

        "after_or_equal" => {
            let bound = arg.and_then(parse_date_str)?;
            (!as_date(value).is_some_and(|date| date >= bound)).then(|| {
                format!(
                    "The {field} must be a date after or equal to {}.",
                    arg.unwrap_or("")
                )
            })
        }

        "before" => {
            let bound = arg.and_then(parse_date_str)?;
            (!as_date(value).is_some_and(|date| date < bound))
                .then(|| format!("The {field} must be a date before {}.", arg.unwrap_or("")))
        }

        "before_or_equal" => {
            let bound = arg.and_then(parse_date_str)?;
            (!as_date(value).is_some_and(|date| date <= bound)).then(|| {
                format!(
                    "The {field} must be a date before or equal to {}.",
                    arg.unwrap_or("")
                )
            })
        }

        "date_format" => {
            let format = arg?;
            let matches = value.as_str().is_some_and(|s| {
                NaiveDate::parse_from_str(s, format).is_ok()
                    || NaiveDateTime::parse_from_str(s, format).is_ok()
            });
            (!matches).then(|| format!("The {field} does not match the format {format}."))
        }

        _ => {
            debug!(rule = %name, field = %field, "skipping unknown rule token");
            None
        }
    }
}

/// Missing, null, empty string, or empty array.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Comparison size: numeric value for numbers, character count for
/// strings, element count for arrays. A numeric string counts as its
/// numeric value only for fields declared numeric.
fn size_of(value: &Value, numeric: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if numeric {
                if let Ok(n) = s.parse::<f64>() {
                    return Some(n);
                }
            }
            Some(s.chars().count() as f64)
        }
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
        Value::String(s) => matches!(s.as_str(), "0" | "1" | "true" | "false"),
        _ => false,
    }
}

fn is_accepted(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "yes" | "on"),
        _ => false,
    }
}

fn as_date(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date_str)
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn comparable(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Number of fractional digits in a number or numeric string.
fn decimal_places(value: &Value) -> Option<usize> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            s.parse::<f64>().ok()?;
            s.clone()
        }
        _ => return None,
    };
    Some(text.split_once('.').map_or(0, |(_, frac)| frac.len()))
}
