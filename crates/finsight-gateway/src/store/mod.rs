//! Record store: where the fundamentals table comes from.
//!
//! Every request performs a full, unfiltered scan through a `RecordSource`.
//! Nothing is cached between requests. Documents are decoded into typed
//! records at this boundary (see `decode`), so metric code never sees raw
//! BSON.

pub mod decode;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use finsight_core::error::Result;
use finsight_core::RecordTable;

pub use decode::{decode_record, TableBuilder};
pub use memory::InMemoryRecordSource;
pub use mongo::MongoRecordSource;

/// Outcome of one full scan.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub table: RecordTable,
    /// Documents left out under the `skip` malformed policy.
    pub skipped: usize,
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short name for logs.
    fn kind(&self) -> &'static str;

    /// Scan the whole collection into a table, in scan order.
    async fn load_all(&self) -> Result<LoadReport>;

    /// Cheap reachability probe for readiness.
    async fn ping(&self) -> Result<()>;
}
