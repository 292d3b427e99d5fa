//! Core userdir types.
//!
//! Identifiers and URLs are validated at construction time; record field
//! values themselves are kept as plain data (see [`Record`](crate::Record)).

mod api_url;
mod record_id;

pub use api_url::ApiUrl;
pub use record_id::RecordId;
