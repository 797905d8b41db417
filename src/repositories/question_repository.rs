use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::dto::RawQuestionRecord};

/// Read side of the question catalog. Records come back in whatever encoding
/// an administrator's tooling wrote them; normalization happens in the
/// catalog service, not here.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<RawQuestionRecord>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<RawQuestionRecord>>;
}

pub struct MongoQuestionRepository {
    collection: Collection<RawQuestionRecord>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db.questions_collection());
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<RawQuestionRecord>> {
        let records = self
            .collection
            .find(doc! {})
            .sort(doc! { "id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<RawQuestionRecord>> {
        let record = self.collection.find_one(doc! { "id": id }).await?;
        Ok(record)
    }
}
