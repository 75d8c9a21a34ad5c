use std::collections::BTreeMap;
use time::OffsetDateTime;

use crate::auth::Identity;
use crate::models::VoteRecord;

/// The `votes` table. Holds one record per identity that has voted.
#[derive(Debug, Clone, Default)]
pub struct VoterLedger {
    records: BTreeMap<u64, VoteRecord>,
    next_id: u64,
}

impl VoterLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: impl IntoIterator<Item = VoteRecord>) -> Self {
        let records: BTreeMap<_, _> = records.into_iter().map(|v| (v.id, v)).collect();
        let next_id = records.keys().next_back().map_or(0, |id| id + 1);
        Self { records, next_id }
    }

    // Linear scan; populations are small and this is not a hot path.
    pub fn has_voted(&self, identity: &Identity) -> bool {
        self.records.values().any(|v| v.voter_identity == identity.as_str())
    }

    /// Stores a vote without re-validating it. Cannot fail.
    pub fn insert(&mut self, candidate_id: u64, identity: &Identity, cast_at: OffsetDateTime) -> &VoteRecord {
        let id = self.next_id;
        self.next_id += 1;
        self.records.entry(id).or_insert(VoteRecord {
            id,
            candidate_id,
            voter_identity: identity.as_str().to_string(),
            cast_at,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoteRecord> + '_ {
        self.records.values()
    }

    /// Secondary-key lookup: every vote cast for `candidate_id`.
    pub fn votes_for(&self, candidate_id: u64) -> impl Iterator<Item = &VoteRecord> + '_ {
        self.records.values().filter(move |v| v.candidate_id == candidate_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn delete_all(&mut self) {
        self.records.clear();
        self.next_id = 0;
    }
}
