use election::{Candidate, Identity, MessageResponse, Proof, Snapshot, TallyLine, VoteRecord};
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::queries::Queries;
use crate::store::{AppState, ServerElection};

/// Runs engine operations against the shared election and mirrors every
/// committed change into the database. When the write fails the in-memory
/// state is rolled back to the snapshot taken before the operation.
pub struct ElectionProcessor;

impl ElectionProcessor {
    pub async fn add_candidate(state: &AppState, name: &str, proof: Option<&Proof>) -> Result<Candidate, ApiError> {
        let mut election = state.election.lock().await;
        election.authorize_admin(proof)?;

        let before = state.db.as_ref().map(|_| election.snapshot());
        let candidate = election.add_candidate(name)?;

        if let (Some(db), Some(before)) = (&state.db, before) {
            if let Err(e) = Queries::insert_candidate(db, &candidate).await {
                Self::rollback(&mut election, before, "candidate insert");
                return Err(e);
            }
        }
        Ok(candidate)
    }

    pub async fn cast_vote(
        state: &AppState,
        identity: &Identity,
        proof: &Proof,
        candidate_id: u64,
    ) -> Result<VoteRecord, ApiError> {
        let mut election = state.election.lock().await;

        let before = state.db.as_ref().map(|_| election.snapshot());
        let record = election.cast_vote(identity, proof, candidate_id)?;

        if let (Some(db), Some(before)) = (&state.db, before) {
            if let Err(e) = Queries::record_vote(db, &record).await {
                Self::rollback(&mut election, before, "vote");
                return Err(e);
            }
        }
        Ok(record)
    }

    pub async fn reset(state: &AppState, proof: Option<&Proof>) -> Result<MessageResponse, ApiError> {
        let mut election = state.election.lock().await;
        election.authorize_admin(proof)?;

        let before = state.db.as_ref().map(|_| election.snapshot());
        election.reset();

        if let (Some(db), Some(before)) = (&state.db, before) {
            if let Err(e) = Queries::clear(db).await {
                Self::rollback(&mut election, before, "reset");
                return Err(e);
            }
        }
        Ok(MessageResponse { message: "pets and voters reset successfully.".into() })
    }

    pub async fn tally(state: &AppState) -> Vec<TallyLine> {
        state.election.lock().await.tally()
    }

    pub async fn candidate(state: &AppState, id: u64) -> Result<Candidate, ApiError> {
        Ok(state.election.lock().await.candidate(id)?.clone())
    }

    pub async fn votes(state: &AppState) -> Vec<VoteRecord> {
        state.election.lock().await.votes().cloned().collect()
    }

    pub async fn version(state: &AppState) -> String {
        state.election.lock().await.version()
    }

    /// Loads both tables into a fresh election at launch.
    pub async fn load(election: &mut ServerElection, pool: &PgPool) -> Result<(), ApiError> {
        let snapshot = Queries::load(pool).await?;
        info!(
            "📋 Loaded {} candidates and {} votes",
            snapshot.candidates.len(),
            snapshot.votes.len()
        );
        election.restore(snapshot)?;
        Ok(())
    }

    // The engine has already reported the operation as successful by now.
    fn rollback(election: &mut ServerElection, before: Snapshot, operation: &str) {
        warn!("The {} reported above was not persisted, rolling back in-memory election state", operation);
        if let Err(e) = election.restore(before) {
            error!("Rollback failed: {}", e);
        }
    }
}
