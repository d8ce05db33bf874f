use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::Document;

use finsight_core::error::{Result, FinsightError};

use crate::config::MalformedPolicy;

use super::{LoadReport, RecordSource, TableBuilder};

/// Document store held in memory. Goes through the same decode path as the
/// MongoDB source; used by tests and local demos.
pub struct InMemoryRecordSource {
    docs: RwLock<Vec<Document>>,
    policy: MalformedPolicy,
    reachable: bool,
}

impl InMemoryRecordSource {
    pub fn new(docs: Vec<Document>) -> Self {
        Self {
            docs: RwLock::new(docs),
            policy: MalformedPolicy::Skip,
            reachable: true,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// A source whose every call fails, as an unreachable database would.
    pub fn unreachable() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
            policy: MalformedPolicy::Skip,
            reachable: false,
        }
    }

    pub fn insert(&self, doc: Document) {
        if let Ok(mut docs) = self.docs.write() {
            docs.push(doc);
        }
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn load_all(&self) -> Result<LoadReport> {
        self.ping().await?;
        let docs = self
            .docs
            .read()
            .map_err(|_| FinsightError::Internal("memory store lock poisoned".into()))?;
        let mut builder = TableBuilder::new(self.policy);
        for doc in docs.iter() {
            builder.push(doc)?;
        }
        Ok(builder.finish())
    }

    async fn ping(&self) -> Result<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(FinsightError::Unavailable("memory store marked unreachable".into()))
        }
    }
}
