use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::Candidate;

/// The `candidates` table: one record per candidate, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    records: BTreeMap<u64, Candidate>,
    next_id: u64,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from existing records. Later records win on a
    /// duplicate id; the counter resumes after the highest id seen.
    pub(crate) fn from_records(records: impl IntoIterator<Item = Candidate>) -> Self {
        let records: BTreeMap<_, _> = records.into_iter().map(|c| (c.id, c)).collect();
        let next_id = records.keys().next_back().map_or(0, |id| id + 1);
        Self { records, next_id }
    }

    /// Name validation happens in the engine; the store only allocates.
    pub fn insert(&mut self, name: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(id, Candidate { id, name: name.into(), vote_count: 0 });
        id
    }

    pub fn get(&self, id: u64) -> Result<&Candidate, StoreError> {
        self.records.get(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn increment_votes(&mut self, id: u64) -> Result<&Candidate, StoreError> {
        let candidate = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        candidate.vote_count += 1;
        Ok(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record and starts a new identifier lifetime.
    pub fn delete_all(&mut self) {
        self.records.clear();
        self.next_id = 0;
    }
}
