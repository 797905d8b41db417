pub mod catalog_service;
pub mod scoring_service;
pub mod submission_service;

pub use catalog_service::CatalogService;
pub use scoring_service::ScoringService;
pub use submission_service::SubmissionService;
