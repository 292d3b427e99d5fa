//! The local record store.
//!
//! [`RecordStore`] owns the working collection and keeps it in step with a
//! [`SnapshotStorage`] backend. The collection is populated from a
//! [`RemoteSource`] only while no snapshot exists; after that every read and
//! write goes through the snapshot until the last record is deleted.
//!
//! Every mutation re-reads the snapshot, applies the change, and writes the
//! whole collection back. An empty collection is never persisted: the key is
//! removed instead.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::error::{Error, NotFoundError, ParseError, StorageError};
use crate::record::{Record, RecordDraft, RecordPatch};
use crate::traits::{RemoteSource, SnapshotStorage};
use crate::types::RecordId;

/// Storage key holding the serialized collection.
pub const SNAPSHOT_KEY: &str = "users";

/// Query sent to the remote source when none is configured.
pub const DEFAULT_QUERY: &str = "YOUR_NAME";

/// What [`RecordStore::begin_fetch`] decided to do.
#[derive(Debug)]
pub enum FetchPlan<R> {
    /// A snapshot existed and has been loaded; nothing to fetch.
    Cached,
    /// No snapshot; run the fetch and hand the outcome back to the store.
    Remote(PendingFetch<R>),
}

/// A remote fetch that has been planned but not yet run.
///
/// Running it does not borrow the store, so the caller decides whether to
/// await it, drop it, or let a newer fetch supersede it.
#[derive(Debug)]
pub struct PendingFetch<R> {
    generation: u64,
    query: String,
    remote: Arc<R>,
}

impl<R: RemoteSource> PendingFetch<R> {
    /// The generation this fetch belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Query the remote source.
    pub async fn run(self) -> FetchOutcome {
        debug!(generation = self.generation, query = %self.query, "Running remote fetch");
        let result = self.remote.search_users(&self.query).await;
        FetchOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// The result of a [`PendingFetch`], tagged with its generation.
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    result: Result<Vec<Record>>,
}

impl FetchOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Single source of truth for the record collection.
#[derive(Debug)]
pub struct RecordStore<S, R> {
    storage: S,
    remote: Arc<R>,
    query: String,
    records: Vec<Record>,
    generation: u64,
}

impl<S, R> RecordStore<S, R>
where
    S: SnapshotStorage,
    R: RemoteSource,
{
    /// Create a store over the given storage and remote source.
    ///
    /// The working collection starts empty; call [`load_all`](Self::load_all).
    pub fn new(storage: S, remote: R) -> Self {
        Self {
            storage,
            remote: Arc::new(remote),
            query: DEFAULT_QUERY.to_string(),
            records: Vec::new(),
            generation: 0,
        }
    }

    /// Use a different remote query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Access the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The current working collection.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the collection, populating it remotely if no snapshot exists.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Parse`] if the snapshot is malformed, or with a
    /// remote fetch error ([`Error::Transport`] / [`Error::Remote`]) when the
    /// remote call fails. On a fetch failure the collection is left empty and
    /// nothing is persisted. There is no retry.
    #[instrument(skip(self), fields(query = %self.query))]
    pub async fn load_all(&mut self) -> Result<&[Record]> {
        match self.begin_fetch()? {
            FetchPlan::Cached => Ok(&self.records),
            FetchPlan::Remote(pending) => {
                let outcome = pending.run().await;
                self.complete_fetch(outcome)
            }
        }
    }

    /// Load the snapshot without ever contacting the remote source.
    ///
    /// With no snapshot the working collection is empty. Any fetch still in
    /// flight is superseded.
    pub fn load_snapshot(&mut self) -> Result<&[Record]> {
        self.records = self.read_snapshot()?.unwrap_or_default();
        self.generation += 1;
        debug!(count = self.records.len(), "Loaded collection from snapshot");
        Ok(&self.records)
    }

    /// Load the snapshot if there is one, otherwise plan a remote fetch.
    ///
    /// Either way, any fetch planned earlier is superseded. Planning a fetch
    /// also clears the working collection.
    pub fn begin_fetch(&mut self) -> Result<FetchPlan<R>> {
        if let Some(records) = self.read_snapshot()? {
            debug!(count = records.len(), "Loaded collection from snapshot");
            self.records = records;
            self.generation += 1;
            return Ok(FetchPlan::Cached);
        }

        self.records.clear();
        self.generation += 1;

        Ok(FetchPlan::Remote(PendingFetch {
            generation: self.generation,
            query: self.query.clone(),
            remote: Arc::clone(&self.remote),
        }))
    }

    /// Apply the outcome of a fetch planned by [`begin_fetch`](Self::begin_fetch).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleFetch`] without touching anything if the fetch
    /// was cancelled or superseded; otherwise the fetch's own error, if any.
    #[instrument(skip(self, outcome), fields(generation = outcome.generation))]
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Result<&[Record]> {
        if outcome.generation != self.generation {
            debug!(current = self.generation, "Discarding stale fetch result");
            return Err(Error::StaleFetch {
                generation: outcome.generation,
                current: self.generation,
            });
        }

        match outcome.result {
            Ok(records) => {
                // Another writer may have stored a snapshot meanwhile; it wins.
                if let Some(existing) = self.read_snapshot()? {
                    debug!(count = existing.len(), "Snapshot appeared during fetch, keeping it");
                    self.records = existing;
                    return Ok(&self.records);
                }
                self.persist(&records)?;
                info!(count = records.len(), "Populated collection from remote source");
                self.records = records;
                Ok(&self.records)
            }
            Err(e) => {
                warn!(error = %e, "Remote fetch failed");
                self.records.clear();
                Err(e)
            }
        }
    }

    /// Discard the result of any fetch that is still in flight.
    pub fn cancel_fetch(&mut self) {
        self.generation += 1;
    }

    /// Find a record in the working collection by id.
    pub fn find_by_id(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Find a record in the working collection by login.
    pub fn find_by_login(&self, login: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.login == login)
    }

    /// Append a validated draft, generating an id if none was preset.
    ///
    /// No duplicate-login check is done.
    #[instrument(skip(self, draft), fields(login = %draft.login))]
    pub fn create(&mut self, draft: RecordDraft) -> Result<Record> {
        let mut next = self.current()?;
        let record = draft.into_record(RecordId::generate);
        next.push(record.clone());

        self.commit(next)?;
        debug!(id = %record.id, "Created record");

        Ok(record)
    }

    /// Merge `patch` over the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record; nothing changes.
    #[instrument(skip(self, patch))]
    pub fn update(&mut self, id: &RecordId, patch: &RecordPatch) -> Result<Record> {
        let mut next = self.current()?;
        let Some(index) = next.iter().position(|r| &r.id == id) else {
            warn!("Update aborted: record not found");
            return Err(NotFoundError::Id(id.clone()).into());
        };

        let updated = patch.apply(&next[index]);
        next[index] = updated.clone();

        self.commit(next)?;
        debug!("Updated record");

        Ok(updated)
    }

    /// Remove the record with `id`.
    ///
    /// Removing the last record deletes the snapshot key, so the next
    /// [`load_all`](Self::load_all) fetches remotely again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record; nothing changes.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &RecordId) -> Result<Record> {
        let next = self.current()?;
        match next.iter().position(|r| &r.id == id) {
            Some(index) => self.remove_at(next, index),
            None => {
                warn!("Delete aborted: record not found");
                Err(NotFoundError::Id(id.clone()).into())
            }
        }
    }

    /// Remove the first record whose login matches.
    ///
    /// Same snapshot rules as [`delete`](Self::delete). Only unambiguous
    /// while logins are unique.
    #[instrument(skip(self))]
    pub fn delete_by_login(&mut self, login: &str) -> Result<Record> {
        let next = self.current()?;
        match next.iter().position(|r| r.login == login) {
            Some(index) => self.remove_at(next, index),
            None => {
                warn!("Delete aborted: record not found");
                Err(NotFoundError::Login(login.to_string()).into())
            }
        }
    }

    fn remove_at(&mut self, mut next: Vec<Record>, index: usize) -> Result<Record> {
        let removed = next.remove(index);
        self.commit(next)?;
        debug!(id = %removed.id, remaining = self.records.len(), "Deleted record");
        Ok(removed)
    }

    /// The collection as currently persisted, falling back to the working
    /// set when no snapshot exists.
    fn current(&self) -> Result<Vec<Record>> {
        Ok(self
            .read_snapshot()?
            .unwrap_or_else(|| self.records.clone()))
    }

    /// Persist `next` and make it the working collection.
    ///
    /// A local write supersedes any fetch still in flight.
    fn commit(&mut self, next: Vec<Record>) -> Result<()> {
        self.persist(&next)?;
        self.records = next;
        self.generation += 1;
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Option<Vec<Record>>> {
        let Some(raw) = self.storage.get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };

        let records = serde_json::from_str(&raw).map_err(|source| ParseError::Snapshot {
            key: SNAPSHOT_KEY.to_string(),
            source,
        })?;

        Ok(Some(records))
    }

    fn persist(&self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            debug!("Collection empty, removing snapshot");
            return self.storage.remove(SNAPSHOT_KEY);
        }

        let json = serde_json::to_string(records).map_err(StorageError::Encode)?;
        self.storage.set(SNAPSHOT_KEY, &json)
    }
}
