//! Building the record store from CLI settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use userdir_core::{ApiUrl, RecordStore};
use userdir_file::FileStorage;
use userdir_http::{SearchClient, SearchRemote};

use crate::cli::StoreArgs;

pub type CliStore = RecordStore<FileStorage, SearchRemote>;

/// Resolve the snapshot directory.
fn data_dir(args: &StoreArgs) -> Result<PathBuf> {
    if let Some(ref dir) = args.data_dir {
        return Ok(dir.clone());
    }

    let dirs =
        ProjectDirs::from("", "", "userdir").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Open the store. Nothing is read until the first load.
pub fn open_store(args: &StoreArgs) -> Result<CliStore> {
    let root = data_dir(args)?;
    debug!(root = %root.display(), "Using data directory");

    let api = ApiUrl::new(&args.api).context("Invalid API URL")?;
    let mut client = SearchClient::new(api).context("Failed to build HTTP client")?;
    if let Some(ref token) = args.token {
        client = client.with_token(token).context("Invalid API token")?;
    }

    Ok(RecordStore::new(FileStorage::new(root), SearchRemote::from_client(client))
        .with_query(args.query.clone()))
}

/// Open the store and read the snapshot, without populating it remotely.
pub fn load_local_store(args: &StoreArgs) -> Result<CliStore> {
    let mut store = open_store(args)?;
    store.load_snapshot().context("Failed to read users")?;
    Ok(store)
}

/// Open the store and load the collection, fetching it if none is stored.
pub async fn load_store(args: &StoreArgs) -> Result<CliStore> {
    let mut store = open_store(args)?;
    store.load_all().await.context("Failed to load users")?;
    Ok(store)
}
