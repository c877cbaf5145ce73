//! Field-by-field extraction of institution records
//!
//! Each field is read through [`try_extract`], so a missing key or an
//! unparsable value only blanks that one field.

use crate::extract::{NumberFormat, Record};
use serde_json::Value;

const NAME: &str = "/institution/displayName";
const STATE: &str = "/institution/state";
const RANK: &str = "/parent/sortRank";
const TUITION: &str = "/searchData/tuition/displayValue";
const TUITION_VARIANT: &str = "/searchData/tuition/displayValue/0/value";
const ACCEPTANCE_RATE: &str = "/searchData/acceptanceRate/displayValue";
const TEST_AVERAGES: &str = "/searchData/testAvgs/displayValue";
const SAT_RANGE: &str = "/searchData/testAvgs/displayValue/0/value";
const ACT_RANGE: &str = "/searchData/testAvgs/displayValue/1/value";
const ENGINEERING_SCORE: &str = "/searchData/engineeringRepScore/rawValue";
const BUSINESS_SCORE: &str = "/searchData/businessRepScore/rawValue";
const CS_SCORE: &str = "/searchData/computerScienceRepScore/rawValue";
const NURSING_SCORE: &str = "/searchData/nursingRepScore/rawValue";

/// A field whose path exists but whose value has an unrecognized shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDrift {
    /// Column the value was meant for
    pub field: &'static str,
    /// JSON pointer that was inspected
    pub path: &'static str,
    /// JSON type that was found instead
    pub found: &'static str,
}

/// Reads the value at a JSON pointer and applies `parser` to it
///
/// Yields `None` when the path is missing or the parser rejects the value.
pub fn try_extract<'a, T>(
    raw: &'a Value,
    path: &str,
    parser: impl FnOnce(&'a Value) -> Option<T>,
) -> Option<T> {
    raw.pointer(path).and_then(parser)
}

/// Extracts a fixed-shape record from one raw institution object
///
/// Never fails: every field that cannot be read is left unknown.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use usnews_ranker::extract::{extract, NumberFormat};
///
/// let raw = json!({
///     "institution": { "displayName": "Rice University", "state": "TX" },
///     "searchData": { "tuition": { "displayValue": "$54,960" } }
/// });
/// let record = extract(&raw, &NumberFormat::default());
/// assert_eq!(record.tuition, Some(54960.0));
/// assert_eq!(record.rank, None);
/// ```
pub fn extract(raw: &Value, format: &NumberFormat) -> Record {
    Record {
        rank: try_extract(raw, RANK, parse_rank),
        name: try_extract(raw, NAME, as_text),
        state: try_extract(raw, STATE, as_text),
        tuition: extract_tuition(raw, format),
        acceptance_rate: try_extract(raw, ACCEPTANCE_RATE, parse_percentage),
        sat_range: try_extract(raw, SAT_RANGE, as_text),
        act_range: try_extract(raw, ACT_RANGE, as_text),
        engineering_score: try_extract(raw, ENGINEERING_SCORE, parse_score),
        business_score: try_extract(raw, BUSINESS_SCORE, parse_score),
        cs_score: try_extract(raw, CS_SCORE, parse_score),
        nursing_score: try_extract(raw, NURSING_SCORE, parse_score),
    }
}

/// Extracts a record and reports values whose shape was not recognized
pub fn extract_checked(raw: &Value, format: &NumberFormat) -> (Record, Vec<SchemaDrift>) {
    (extract(raw, format), detect_drift(raw))
}

/// Tuition is either a plain currency string or a list of variants whose
/// first entry carries the amount. A string that does not parse stays unknown.
fn extract_tuition(raw: &Value, format: &NumberFormat) -> Option<f64> {
    match raw.pointer(TUITION) {
        Some(Value::String(text)) => format.parse_currency(text),
        _ => try_extract(raw, TUITION_VARIANT, |value| {
            value.as_str().and_then(|text| format.parse_currency(text))
        }),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn parse_rank(value: &Value) -> Option<u32> {
    let rank = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })?,
        Value::String(text) => text.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    u32::try_from(rank).ok().filter(|rank| *rank > 0)
}

fn parse_percentage(value: &Value) -> Option<f64> {
    let text = value.as_str()?;
    text.trim()
        .trim_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|percent| percent.is_finite())
        .map(|percent| percent / 100.0)
}

fn parse_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|score| score.is_finite())
}

fn detect_drift(raw: &Value) -> Vec<SchemaDrift> {
    let mut drift = Vec::new();

    let mut check = |field: &'static str, path: &'static str, accepts: fn(&Value) -> bool| {
        if let Some(value) = raw.pointer(path) {
            if !value.is_null() && !accepts(value) {
                drift.push(SchemaDrift {
                    field,
                    path,
                    found: json_type(value),
                });
            }
        }
    };

    check("Rank", RANK, |v| v.is_number() || v.is_string());
    check("Tuition", TUITION, |v| {
        v.is_string() || v.pointer("/0/value").is_some_and(Value::is_string)
    });
    check("Acc Rate", ACCEPTANCE_RATE, Value::is_string);
    check("SAT Range", TEST_AVERAGES, Value::is_array);

    drift
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
