//! Search API client implementation.

mod client;
mod endpoints;

pub use client::{DEFAULT_API_URL, SearchClient};
pub use endpoints::{SearchItem, SearchUsersResponse};
