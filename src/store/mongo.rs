use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};

use crate::error::{AppError, AppResult};
use crate::models::{sort_newest_first, LogEntry};
use crate::store::LogStore;

const COLLECTION: &str = "api_logs";

/// Remote log store: one MongoDB document per entry, with `_id` set to the entry id
#[derive(Clone)]
pub struct MongoLogStore {
    collection: Collection<Document>,
}

impl MongoLogStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    /// Connect and check that the server answers
    pub async fn connect(url: &str, database: &str) -> AppResult<Self> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| AppError::Persistence(format!("MongoDB connection error: {}", e)))?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        Ok(Self::new(&db))
    }
}

/// Entry as stored: `id` moves to `_id`
fn to_document(entry: &LogEntry) -> AppResult<Document> {
    let mut document = bson::to_document(entry)
        .map_err(|e| AppError::Persistence(format!("Failed to encode log entry: {}", e)))?;
    if let Some(id) = document.remove("id") {
        document.insert("_id", id);
    }
    Ok(document)
}

fn from_document(mut document: Document) -> AppResult<LogEntry> {
    if let Some(id) = document.remove("_id") {
        document.insert("id", id);
    }
    bson::from_document(document)
        .map_err(|e| AppError::Persistence(format!("Failed to decode log entry: {}", e)))
}

#[async_trait]
impl LogStore for MongoLogStore {
    async fn append(&self, entry: LogEntry) -> AppResult<()> {
        self.collection.insert_one(to_document(&entry)?).await?;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<LogEntry>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        let mut entries = documents
            .into_iter()
            .map(from_document)
            .collect::<AppResult<Vec<_>>>()?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<LogEntry>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(from_document)
            .transpose()
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.collection.delete_many(doc! {}).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
