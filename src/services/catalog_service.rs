use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::domain::{Question, QuestionKind};
use crate::models::dto::RawQuestionRecord;

/// Converts raw persistence records into the canonical `Question` form.
///
/// Stored surveys accumulated several encodings over time: native arrays,
/// JSON-encoded strings, comma-separated index lists, bare scalars. Each
/// decoder below applies an ordered fallback chain where the first success
/// wins and total failure degrades to an empty collection. Nothing here
/// returns an error: a malformed question record must never block a
/// learner's submission from being scored.
pub struct CatalogService;

impl CatalogService {
    pub fn normalize(record: &RawQuestionRecord) -> Question {
        let (options, correct_indices) = match record.kind {
            // Free-text questions carry no option list; whatever a legacy
            // writer left in these fields is dropped.
            QuestionKind::FreeText => (Vec::new(), BTreeSet::new()),
            _ => (
                Self::decode_options(&record.options),
                Self::decode_indices(&record.correct_indices),
            ),
        };

        if options.is_empty() && !record.options.is_null() && record.kind != QuestionKind::FreeText
        {
            log::warn!(
                "question {} has undecodable options {:?}, degrading to empty",
                record.id,
                record.options
            );
        }

        Question {
            id: record.id,
            prompt: record.prompt.clone(),
            kind: record.kind,
            options,
            correct_indices,
            points: record.points.max(0.0),
            answer_template: record.answer_template.clone(),
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }

    /// Option list decoding: native array as-is, JSON-encoded string next
    /// (a decoded scalar becomes a one-element list), any other non-empty
    /// string is kept whole as a single option, anything else is empty.
    pub fn decode_options(value: &Value) -> Vec<String> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::scalar_to_string).collect(),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => {
                    items.iter().filter_map(Self::scalar_to_string).collect()
                }
                Ok(ref scalar) if !scalar.is_null() => {
                    Self::scalar_to_string(scalar).into_iter().collect()
                }
                // Not JSON at all: the whole string is one option.
                _ if !raw.is_empty() => vec![raw.clone()],
                _ => Vec::new(),
            },
            scalar @ (Value::Number(_) | Value::Bool(_)) => {
                Self::scalar_to_string(scalar).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Correct-index decoding: native array, then JSON-encoded string, then
    /// comma-separated integers with unparseable tokens discarded. Values
    /// that are not positive integers are dropped; out-of-range survivors
    /// are tolerated downstream by the scoring rules.
    pub fn decode_indices(value: &Value) -> BTreeSet<usize> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::scalar_to_index).collect(),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => {
                    items.iter().filter_map(Self::scalar_to_index).collect()
                }
                Ok(ref scalar) => Self::scalar_to_index(scalar).into_iter().collect(),
                Err(_) => raw
                    .split(',')
                    .filter_map(|token| token.trim().parse::<usize>().ok())
                    .filter(|&i| i > 0)
                    .collect(),
            },
            scalar @ Value::Number(_) => Self::scalar_to_index(scalar).into_iter().collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Response decoding, same chain as options but a bare non-JSON string
    /// collapses into a one-element list (the learner's single answer).
    pub fn decode_response(value: &Value) -> Vec<String> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::scalar_to_string).collect(),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => {
                    items.iter().filter_map(Self::scalar_to_string).collect()
                }
                Ok(ref scalar) if !scalar.is_null() => {
                    Self::scalar_to_string(scalar).into_iter().collect()
                }
                _ if !raw.is_empty() => vec![raw.clone()],
                _ => Vec::new(),
            },
            scalar @ (Value::Number(_) | Value::Bool(_)) => {
                Self::scalar_to_string(scalar).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn scalar_to_index(value: &Value) -> Option<usize> {
        match value {
            Value::Number(n) => n.as_u64().map(|n| n as usize).filter(|&i| i > 0),
            Value::String(s) => s.trim().parse::<usize>().ok().filter(|&i| i > 0),
            _ => None,
        }
    }
}
