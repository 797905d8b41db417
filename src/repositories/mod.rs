pub mod question_repository;
pub mod submission_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
