pub mod records;
pub mod report;
pub mod request;

pub use records::RawQuestionRecord;
pub use report::{QuestionReport, SubmissionReport};
pub use request::ManualGradeRequest;
