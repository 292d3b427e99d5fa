//! userdir-http - Search API client for populating the directory.
//!
//! [`SearchClient`] talks to a GitHub-style `search/users` endpoint and
//! [`SearchRemote`] adapts it to the store's
//! [`RemoteSource`](userdir_core::RemoteSource) port.

mod api;
mod remote;

pub use api::{DEFAULT_API_URL, SearchClient, SearchItem, SearchUsersResponse};
pub use remote::SearchRemote;
