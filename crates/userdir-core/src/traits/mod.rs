//! Ports the record store is built on.

mod remote;
mod storage;

pub use remote::RemoteSource;
pub use storage::SnapshotStorage;
