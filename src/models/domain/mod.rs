pub mod question;
pub mod submission;
pub use question::{Question, QuestionKind};
pub use submission::Submission;
