//! MongoDB-backed record source.
//!
//! The client is built once at startup and owns a connection pool; each scan
//! checks a connection out of the pool for the duration of the cursor and
//! returns it when the cursor is dropped.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use finsight_core::error::{Result, FinsightError};

use crate::config::{DatabaseSection, MalformedPolicy};

use super::{LoadReport, RecordSource, TableBuilder};

pub struct MongoRecordSource {
    client: Client,
    collection: Collection<Document>,
    policy: MalformedPolicy,
}

fn unavailable(e: mongodb::error::Error) -> FinsightError {
    FinsightError::Unavailable(e.to_string())
}

impl MongoRecordSource {
    /// Build the pooled client. Connections are opened lazily, so an
    /// unreachable server surfaces on the first scan or ping.
    pub async fn connect(db: &DatabaseSection, policy: MalformedPolicy) -> Result<Self> {
        let mut opts = ClientOptions::parse(&db.uri)
            .await
            .map_err(|e| FinsightError::BadRequest(format!("database.uri rejected: {e}")))?;
        opts.app_name = Some(db.app_name.clone());
        opts.connect_timeout = Some(Duration::from_millis(db.connect_timeout_ms));
        opts.server_selection_timeout = Some(Duration::from_millis(db.server_selection_timeout_ms));

        let client = Client::with_options(opts).map_err(unavailable)?;
        let collection = client.database(&db.name).collection::<Document>(&db.collection);

        tracing::info!(database = %db.name, collection = %db.collection, "mongodb client ready");
        Ok(Self {
            client,
            collection,
            policy,
        })
    }
}

#[async_trait]
impl RecordSource for MongoRecordSource {
    fn kind(&self) -> &'static str {
        "mongodb"
    }

    async fn load_all(&self) -> Result<LoadReport> {
        let t0 = Instant::now();
        let mut cursor = self.collection.find(None, None).await.map_err(unavailable)?;

        let mut builder = TableBuilder::new(self.policy);
        while let Some(doc) = cursor.try_next().await.map_err(unavailable)? {
            builder.push(&doc)?;
        }
        let report = builder.finish();

        tracing::debug!(
            collection = %self.collection.name(),
            records = report.table.len(),
            skipped = report.skipped,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "collection scanned"
        );
        Ok(report)
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
