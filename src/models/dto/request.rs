use serde::Deserialize;
use validator::Validate;

/// Administrator grade for one free-text question within a submission.
///
/// The static bounds live here; the dynamic bound (award must not exceed the
/// question's point value) is enforced by `ScoringService::apply_manual_grade`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManualGradeRequest {
    pub question_id: i64,

    #[validate(range(min = 0.0))]
    pub award: f64,

    #[validate(length(max = 2000))]
    pub comment: String,
}
