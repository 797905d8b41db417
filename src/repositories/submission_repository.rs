use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Submission,
};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    async fn list_by_learner(
        &self,
        learner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)>;
    /// Write back a regraded submission's score fields verbatim. Two
    /// administrators grading the same submission must be serialized here;
    /// the scoring layer assumes this method provides that guarantee.
    async fn update_grades(&self, submission: &Submission) -> AppResult<()>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db.submissions_collection());
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let learner_index = IndexModel::builder()
            .keys(doc! { "learner_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("learner_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(learner_index).await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn list_by_learner(
        &self,
        learner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let filter = doc! { "learner_id": learner_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let submissions = self
            .collection
            .find(filter)
            .skip(offset as u64)
            .limit(limit)
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((submissions, total as i64))
    }

    async fn update_grades(&self, submission: &Submission) -> AppResult<()> {
        let update = doc! {
            "$set": {
                "total_score": submission.total_score,
                "essay_grades": to_bson(&submission.essay_grades)?,
                "essay_comments": to_bson(&submission.essay_comments)?,
                "modified_at": to_bson(&submission.modified_at)?,
            }
        };

        let result = self
            .collection
            .update_one(doc! { "id": &submission.id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Submission with id '{}' not found",
                submission.id
            )));
        }

        Ok(())
    }
}
