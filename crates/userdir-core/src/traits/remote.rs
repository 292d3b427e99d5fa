//! Remote source trait.

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;

/// The external search endpoint that supplies the initial collection.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Run a user search and map every match into a [`Record`].
    async fn search_users(&self, query: &str) -> Result<Vec<Record>>;
}
