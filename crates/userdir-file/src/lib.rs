//! userdir-file - Filesystem-backed snapshot storage.

mod store;

pub use store::FileStorage;
