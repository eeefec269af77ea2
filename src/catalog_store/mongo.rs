use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use super::CatalogStore;
use crate::config::CatalogStoreConfig;
use crate::errors::AppError;
use crate::models::CatalogItem;

#[derive(Clone)]
pub struct MongoCatalogStore {
    collection: Collection<CatalogItem>,
}

impl MongoCatalogStore {
    pub async fn connect(config: &CatalogStoreConfig) -> Result<Self, AppError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let collection = client
            .database(&config.database)
            .collection(&config.collection);
        Ok(Self { collection })
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    async fn list(&self, category_prefix: Option<&str>) -> Result<Vec<CatalogItem>, AppError> {
        let filter: Document = match category_prefix {
            Some(prefix) => doc! {
                "category": {
                    "$regex": format!("^{}", regex::escape(prefix)),
                    "$options": "i",
                }
            },
            None => doc! {},
        };
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogItem>, AppError> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn find_by_real_id(&self, real_id: &str) -> Result<Option<CatalogItem>, AppError> {
        Ok(self.collection.find_one(doc! { "realId": real_id }).await?)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<CatalogItem>, AppError> {
        Ok(self.collection.find_one(doc! { "title": title }).await?)
    }

    async fn upsert(&self, item: &CatalogItem) -> Result<(), AppError> {
        let document =
            mongodb::bson::to_document(item).map_err(mongodb::error::Error::from)?;
        self.collection
            .update_one(doc! { "id": &item.id }, doc! { "$set": document })
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn accept_by_title(&self, title: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(doc! { "title": title }, doc! { "$set": { "accepted": true } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_title(&self, title: &str) -> Result<u64, AppError> {
        let result = self.collection.delete_one(doc! { "title": title }).await?;
        Ok(result.deleted_count)
    }
}
