//! [`RemoteSource`] backed by the search API.

use async_trait::async_trait;
use tracing::instrument;

use userdir_core::{ApiUrl, Record, RemoteSource, Result};

use crate::api::{SearchClient, SearchItem};

/// Fetches the initial directory from the user search API.
#[derive(Debug, Clone)]
pub struct SearchRemote {
    client: SearchClient,
}

impl SearchRemote {
    /// Create a remote source for the given API base.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(api)?,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: SearchClient) -> Self {
        Self { client }
    }

    /// Access the underlying client.
    pub fn client(&self) -> &SearchClient {
        &self.client
    }
}

#[async_trait]
impl RemoteSource for SearchRemote {
    #[instrument(skip(self))]
    async fn search_users(&self, query: &str) -> Result<Vec<Record>> {
        let response = self.client.search_users(query).await?;
        Ok(response
            .items
            .into_iter()
            .map(SearchItem::into_record)
            .collect())
    }
}
