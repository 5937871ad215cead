//! Failures raised while composing derived dashboard data.

use serde_json::json;

use super::Error;
use super::ports::{Collection, RecordStoreError};

/// One collection fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fetching {collection} failed: {cause}")]
pub struct FetchFailed {
    pub collection: Collection,
    #[source]
    pub cause: RecordStoreError,
}

impl FetchFailed {
    pub const fn new(collection: Collection, cause: RecordStoreError) -> Self {
        Self { collection, cause }
    }

    /// Adapter for `map_err` on a port call against `collection`.
    pub fn from_store(collection: Collection) -> impl FnOnce(RecordStoreError) -> Self {
        move |cause| Self::new(collection, cause)
    }
}

/// The whole aggregation failed; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dashboard aggregation failed: {cause}")]
pub struct AggregationFailed {
    #[source]
    pub cause: FetchFailed,
}

impl AggregationFailed {
    /// Collection whose fetch aborted the aggregation.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.cause.collection
    }
}

impl From<FetchFailed> for AggregationFailed {
    fn from(cause: FetchFailed) -> Self {
        Self { cause }
    }
}

impl From<AggregationFailed> for Error {
    fn from(failure: AggregationFailed) -> Self {
        Self::service_unavailable(failure.to_string()).with_details(json!({
            "collection": failure.collection(),
        }))
    }
}
