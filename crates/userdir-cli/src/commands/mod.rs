//! Subcommand implementations.

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use userdir_core::RecordId;

/// Parse an id given on the command line.
fn parse_id(raw: &str) -> Result<RecordId> {
    RecordId::new(raw).context("Invalid user id")
}

/// Read an avatar image from disk.
fn read_avatar(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read avatar file {}", path.display()))
}
