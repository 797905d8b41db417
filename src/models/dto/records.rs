use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::QuestionKind;

/// A question exactly as persistence returns it. Legacy writers stored
/// `options` and `correct_indices` in several shapes: native JSON arrays,
/// JSON-encoded strings, bare scalars, or (indices only) comma-separated
/// strings. Both fields stay as raw `Value`s here and are converted by
/// `CatalogService::normalize`, which never fails.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawQuestionRecord {
    pub id: i64,
    pub prompt: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub correct_indices: Value,
    #[serde(default)]
    pub points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}
