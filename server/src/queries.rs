use election::{Candidate, Snapshot, VoteRecord};
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use crate::error::ApiError;

fn to_db(id: u64) -> Result<i64, ApiError> {
    i64::try_from(id).map_err(|_| ApiError::Database(format!("id {id} does not fit in BIGINT")))
}

fn from_db(value: i64, column: &str) -> Result<u64, ApiError> {
    u64::try_from(value).map_err(|_| ApiError::Database(format!("negative {column}: {value}")))
}

pub struct Queries;

impl Queries {
    pub async fn load(pool: &PgPool) -> Result<Snapshot, ApiError> {
        let candidate_rows = sqlx::query(
            "SELECT id, name, vote_count FROM candidates ORDER BY id"
        )
        .fetch_all(pool)
        .await?;

        let mut candidates = Vec::with_capacity(candidate_rows.len());
        for row in candidate_rows {
            candidates.push(Candidate {
                id: from_db(row.try_get("id")?, "candidate id")?,
                name: row.try_get("name")?,
                vote_count: from_db(row.try_get("vote_count")?, "vote count")?,
            });
        }

        let vote_rows = sqlx::query(
            "SELECT id, candidate_id, voter_identity, cast_at FROM votes ORDER BY id"
        )
        .fetch_all(pool)
        .await?;

        let mut votes = Vec::with_capacity(vote_rows.len());
        for row in vote_rows {
            votes.push(VoteRecord {
                id: from_db(row.try_get("id")?, "vote id")?,
                candidate_id: from_db(row.try_get("candidate_id")?, "candidate id")?,
                voter_identity: row.try_get("voter_identity")?,
                cast_at: row.try_get::<OffsetDateTime, _>("cast_at")?,
            });
        }

        Ok(Snapshot { candidates, votes })
    }

    pub async fn insert_candidate(pool: &PgPool, candidate: &Candidate) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO candidates (id, name, vote_count) VALUES ($1, $2, $3)"
        )
        .bind(to_db(candidate.id)?)
        .bind(&candidate.name)
        .bind(to_db(candidate.vote_count)?)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Count increment and vote insert land in one transaction.
    pub async fn record_vote(pool: &PgPool, vote: &VoteRecord) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE candidates SET vote_count = vote_count + 1 WHERE id = $1"
        )
        .bind(to_db(vote.candidate_id)?)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(ApiError::Database(format!(
                "candidate {} missing from table",
                vote.candidate_id
            )));
        }

        sqlx::query(
            "INSERT INTO votes (id, candidate_id, voter_identity, cast_at)
             VALUES ($1, $2, $3, $4)"
        )
        .bind(to_db(vote.id)?)
        .bind(to_db(vote.candidate_id)?)
        .bind(&vote.voter_identity)
        .bind(vote.cast_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn clear(pool: &PgPool) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM votes").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM candidates").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
