//! userdir-core - Record model, storage ports, and the local record store.
//!
//! The [`RecordStore`] is the single source of truth for the user
//! collection. It is built on two ports: a [`SnapshotStorage`] that holds the
//! serialized collection under one key, and a [`RemoteSource`] that supplies
//! the initial data when no snapshot exists.
//!
//! # Example
//!
//! ```no_run
//! use userdir_core::{MemoryStorage, RecordStore, RemoteSource};
//!
//! # async fn example(remote: impl RemoteSource) -> userdir_core::Result<()> {
//! let mut store = RecordStore::new(MemoryStorage::new(), remote);
//!
//! for record in store.load_all().await? {
//!     println!("{}: {}", record.id, record.login);
//! }
//! # Ok(())
//! # }
//! ```

pub mod avatar;
pub mod error;
pub mod record;
pub mod storage;
pub mod store;
pub mod traits;
pub mod types;
pub mod validate;

pub use avatar::{AvatarImage, ImageType};
pub use error::Error;
pub use record::{AvatarKind, Record, RecordDraft, RecordPatch};
pub use storage::MemoryStorage;
pub use store::{DEFAULT_QUERY, FetchOutcome, FetchPlan, PendingFetch, RecordStore, SNAPSHOT_KEY};
pub use traits::{RemoteSource, SnapshotStorage};
pub use types::{ApiUrl, RecordId};
pub use validate::{DraftInput, PatchInput};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
