//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use ballot_core::{OptionId, Poll, PollId, PollOption, PollUpdate, UserId, Vote};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Collect all keys in a column family that start with the given prefix.
    fn prefix_keys(
        &self,
        cf: &Arc<BoundColumnFamily<'_>>,
        prefix: &[u8],
    ) -> Result<Vec<Vec<u8>>> {
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, rocksdb::Direction::Forward));

        let mut matched = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(prefix) {
                break;
            }

            matched.push(key.to_vec());
        }

        Ok(matched)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Poll Operations
    // =========================================================================

    fn insert_poll(&self, poll: &Poll) -> Result<()> {
        let cf = self.cf(cf::POLLS)?;
        let key = keys::poll_key(&poll.id);
        let value = Self::serialize(poll)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_poll(&self, poll_id: &PollId) -> Result<Option<Poll>> {
        let cf = self.cf(cf::POLLS)?;
        let key = keys::poll_key(poll_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_polls(&self) -> Result<Vec<Poll>> {
        let cf = self.cf(cf::POLLS)?;

        // ULID keys ascend in time, so reverse iteration yields newest first.
        let iter = self.db.iterator_cf(&cf, IteratorMode::End);

        let mut polls = Vec::new();
        for item in iter {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            polls.push(Self::deserialize(&value)?);
        }

        Ok(polls)
    }

    fn update_poll(&self, poll_id: &PollId, update: &PollUpdate) -> Result<Poll> {
        let cf = self.cf(cf::POLLS)?;
        let key = keys::poll_key(poll_id);

        let mut poll = self.get_poll(poll_id)?.ok_or(StoreError::NotFound)?;

        poll.title = update.title.clone();
        poll.description = update.description.clone();
        poll.updated_at = chrono::Utc::now();

        let value = Self::serialize(&poll)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(poll)
    }

    fn delete_poll(&self, poll_id: &PollId) -> Result<()> {
        let cf = self.cf(cf::POLLS)?;
        let key = keys::poll_key(poll_id);

        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Option Operations
    // =========================================================================

    fn insert_poll_options(&self, options: &[PollOption]) -> Result<()> {
        let cf_options = self.cf(cf::POLL_OPTIONS)?;
        let cf_index = self.cf(cf::OPTIONS_BY_POLL)?;

        let mut batch = WriteBatch::default();

        for (position, option) in (0u32..).zip(options) {
            let option_key = keys::option_key(&option.id);
            let index_key = keys::option_index_key(&option.poll_id, position, &option.id);
            let value = Self::serialize(option)?;

            batch.put_cf(&cf_options, &option_key, &value);
            batch.put_cf(&cf_index, &index_key, []); // Index entry (empty value)
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_poll_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>> {
        let cf_index = self.cf(cf::OPTIONS_BY_POLL)?;
        let cf_options = self.cf(cf::POLL_OPTIONS)?;
        let prefix = keys::poll_options_prefix(poll_id);

        let index_keys = self.prefix_keys(&cf_index, &prefix)?;

        let mut options = Vec::with_capacity(index_keys.len());
        for index_key in index_keys {
            let option_id = keys::extract_option_id_from_index_key(&index_key);
            let data = self
                .db
                .get_cf(&cf_options, keys::option_key(&option_id))
                .map_err(|e| StoreError::Database(e.to_string()))?
                .ok_or_else(|| {
                    StoreError::Database(format!("option row missing for index entry: {option_id}"))
                })?;
            options.push(Self::deserialize(&data)?);
        }

        Ok(options)
    }

    // =========================================================================
    // Vote Operations
    // =========================================================================

    fn insert_vote(&self, vote: &Vote) -> Result<()> {
        let cf = self.cf(cf::VOTES)?;
        let key = keys::vote_key(&vote.poll_id, &vote.voter_id);

        // The key layout is the uniqueness guard: refuse an existing row.
        let exists = self
            .db
            .get_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if exists {
            return Err(StoreError::DuplicateVote {
                poll_id: vote.poll_id.to_string(),
                voter_id: vote.voter_id.to_string(),
            });
        }

        let value = Self::serialize(vote)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_vote(&self, poll_id: &PollId, voter_id: &UserId) -> Result<Option<Vote>> {
        let cf = self.cf(cf::VOTES)?;
        let key = keys::vote_key(poll_id, voter_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn tally_votes(&self, poll_id: &PollId) -> Result<HashMap<OptionId, u64>> {
        let cf = self.cf(cf::VOTES)?;
        let prefix = keys::poll_votes_prefix(poll_id);

        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, rocksdb::Direction::Forward));

        let mut tallies: HashMap<OptionId, u64> = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let vote: Vote = Self::deserialize(&value)?;
            *tallies.entry(vote.option_id).or_insert(0) += 1;
        }

        Ok(tallies)
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn delete_poll_cascade(&self, poll_id: &PollId) -> Result<()> {
        if self.get_poll(poll_id)?.is_none() {
            return Err(StoreError::NotFound);
        }

        let cf_polls = self.cf(cf::POLLS)?;
        let cf_options = self.cf(cf::POLL_OPTIONS)?;
        let cf_index = self.cf(cf::OPTIONS_BY_POLL)?;
        let cf_votes = self.cf(cf::VOTES)?;

        let index_keys = self.prefix_keys(&cf_index, &keys::poll_options_prefix(poll_id))?;
        let vote_keys = self.prefix_keys(&cf_votes, &keys::poll_votes_prefix(poll_id))?;

        tracing::debug!(
            %poll_id,
            options = index_keys.len(),
            votes = vote_keys.len(),
            "deleting poll cascade"
        );

        let mut batch = WriteBatch::default();
        for index_key in &index_keys {
            let option_id = keys::extract_option_id_from_index_key(index_key);
            batch.delete_cf(&cf_options, keys::option_key(&option_id));
            batch.delete_cf(&cf_index, index_key);
        }
        for vote_key in &vote_keys {
            batch.delete_cf(&cf_votes, vote_key);
        }
        batch.delete_cf(&cf_polls, keys::poll_key(poll_id));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
