use std::collections::{BTreeSet, HashMap, HashSet};
use time::OffsetDateTime;

use crate::auth::{Authenticator, Identity, Proof};
use crate::candidates::CandidateStore;
use crate::error::{Error, ErrorCode, Result};
use crate::models::{Candidate, Snapshot, TallyLine, VoteRecord};
use crate::report::{NoopReporter, Reporter};
use crate::validation::{validate_candidate_name, validate_identity, ValidationError, MAX_RECORD_ID};
use crate::voters::VoterLedger;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A single-choice election over two tables.
///
/// Every operation runs to completion against `&mut self`; hosts that share
/// an election between tasks serialise access with a lock. A failed
/// operation leaves both stores untouched.
#[derive(Debug)]
pub struct Election<A, R = NoopReporter> {
    candidates: CandidateStore,
    voters: VoterLedger,
    authenticator: A,
    reporter: R,
    admin: Option<Identity>,
}

impl<A: Authenticator> Election<A, NoopReporter> {
    pub fn new(authenticator: A) -> Self {
        Self::with_reporter(authenticator, NoopReporter)
    }
}

impl<A: Authenticator, R: Reporter> Election<A, R> {
    pub fn with_reporter(authenticator: A, reporter: R) -> Self {
        Self {
            candidates: CandidateStore::new(),
            voters: VoterLedger::new(),
            authenticator,
            reporter,
            admin: None,
        }
    }

    /// Restricts `add_candidate` and `reset` to callers proving `admin`.
    /// Without it both operations are open to anyone.
    pub fn with_admin(mut self, admin: Identity) -> Self {
        self.admin = Some(admin);
        self
    }

    pub fn admin(&self) -> Option<&Identity> {
        self.admin.as_ref()
    }

    /// Checks the administrative policy for `add_candidate` and `reset`.
    pub fn authorize_admin(&self, proof: Option<&Proof>) -> Result<()> {
        let Some(admin) = &self.admin else { return Ok(()) };
        match proof {
            Some(proof) if self.authenticator.authenticate(admin, proof) => Ok(()),
            _ => Err(Error::new(ErrorCode::Unauthorized, "Administrator proof required")),
        }
    }

    pub fn version(&self) -> String {
        let banner = format!("petelection version {VERSION}");
        self.reporter.report(&banner);
        banner
    }

    pub fn add_candidate(&mut self, name: &str) -> Result<Candidate> {
        validate_candidate_name(name)?;
        self.reporter.report(&format!("Adding pet {name}"));

        let id = self.candidates.insert(name);
        self.reporter.report(&format!("pet added successfully. pet_key = {id}"));
        Ok(self.candidates.get(id)?.clone())
    }

    pub fn cast_vote(&mut self, identity: &Identity, proof: &Proof, candidate_id: u64) -> Result<VoteRecord> {
        if !self.authenticator.authenticate(identity, proof) {
            return Err(Error::new(
                ErrorCode::Unauthorized,
                format!("Caller is not authorized to act as {identity}"),
            ));
        }

        if self.voters.has_voted(identity) {
            return Err(Error::new(ErrorCode::AlreadyVoted, format!("{identity} has already voted")));
        }

        // Existence is checked up front so that neither mutation below can fail.
        self.candidates.get(candidate_id)?;

        let candidate = self.candidates.increment_votes(candidate_id)?;
        self.reporter.report(&format!("Voted pet: {} successfully", candidate.name));

        let record = self.voters.insert(candidate_id, identity, now_micros());
        Ok(record.clone())
    }

    pub fn reset(&mut self) {
        self.candidates.delete_all();
        self.voters.delete_all();
        self.reporter.report("pets and voters reset successfully.");
    }

    pub fn tally(&self) -> Vec<TallyLine> {
        self.reporter.report("Start listing voted results");
        self.candidates
            .iter()
            .inspect(|c| {
                self.reporter.report(&format!("pet {} has voted count: {}", c.name, c.vote_count))
            })
            .map(TallyLine::from)
            .collect()
    }

    pub fn candidate(&self, id: u64) -> Result<&Candidate> {
        Ok(self.candidates.get(id)?)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.candidates.iter()
    }

    pub fn votes(&self) -> impl Iterator<Item = &VoteRecord> + '_ {
        self.voters.iter()
    }

    pub fn votes_for(&self, candidate_id: u64) -> impl Iterator<Item = &VoteRecord> + '_ {
        self.voters.votes_for(candidate_id)
    }

    pub fn has_voted(&self, identity: &Identity) -> bool {
        self.voters.has_voted(identity)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            candidates: self.candidates.iter().cloned().collect(),
            votes: self.voters.iter().cloned().collect(),
        }
    }

    /// Replaces the election state with `snapshot`, which must satisfy every
    /// invariant the operations maintain. On error nothing changes.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        check_snapshot(&snapshot).map_err(Error::from)?;
        self.candidates = CandidateStore::from_records(snapshot.candidates);
        self.voters = VoterLedger::from_records(snapshot.votes);
        Ok(())
    }
}

// Matches the microsecond precision of `TIMESTAMPTZ`.
fn now_micros() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000).unwrap_or(now)
}

fn check_snapshot(snapshot: &Snapshot) -> std::result::Result<(), ValidationError> {
    let inconsistent = |msg: String| Err(ValidationError::InconsistentState(msg));

    let mut candidate_ids = BTreeSet::new();
    for c in &snapshot.candidates {
        validate_candidate_name(&c.name)?;
        if c.id > MAX_RECORD_ID {
            return inconsistent(format!("candidate id {} out of range", c.id));
        }
        if !candidate_ids.insert(c.id) {
            return inconsistent(format!("duplicate candidate id {}", c.id));
        }
    }

    let mut vote_ids = BTreeSet::new();
    let mut identities = HashSet::new();
    let mut counts: HashMap<u64, u64> = HashMap::new();
    for v in &snapshot.votes {
        validate_identity(&v.voter_identity)?;
        if v.id > MAX_RECORD_ID {
            return inconsistent(format!("vote id {} out of range", v.id));
        }
        if !vote_ids.insert(v.id) {
            return inconsistent(format!("duplicate vote id {}", v.id));
        }
        if !identities.insert(v.voter_identity.as_str()) {
            return inconsistent(format!("{} voted more than once", v.voter_identity));
        }
        if !candidate_ids.contains(&v.candidate_id) {
            return inconsistent(format!("vote {} references unknown candidate {}", v.id, v.candidate_id));
        }
        *counts.entry(v.candidate_id).or_default() += 1;
    }

    for c in &snapshot.candidates {
        let recorded = counts.get(&c.id).copied().unwrap_or(0);
        if c.vote_count != recorded {
            return inconsistent(format!(
                "candidate {} has count {} but {} votes",
                c.id, c.vote_count, recorded
            ));
        }
    }

    Ok(())
}
