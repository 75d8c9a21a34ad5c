use election::{AddCandidateRequest, Candidate, CastVoteRequest, Identity, MessageResponse, Proof, TallyLine, VoteRecord};
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::processor::ElectionProcessor;
use crate::store::AppState;

#[get("/version")]
pub async fn version(state: &State<AppState>) -> String {
    ElectionProcessor::version(state).await
}

#[instrument(skip(state, request, proof))]
#[post("/candidates", format = "json", data = "<request>")]
pub async fn add_candidate(
    state: &State<AppState>,
    request: Json<AddCandidateRequest>,
    proof: Option<Proof>,
) -> Result<Created<Json<Candidate>>, ApiError> {
    let request = request.into_inner();
    let candidate = ElectionProcessor::add_candidate(state, &request.name, proof.as_ref()).await?;
    debug!(candidate_id = candidate.id, "Candidate added");

    let location = format!("/api/candidates/{}", candidate.id);
    Ok(Created::new(location).body(Json(candidate)))
}

#[get("/candidates/<id>")]
pub async fn get_candidate(state: &State<AppState>, id: u64) -> Result<Json<Candidate>, ApiError> {
    ElectionProcessor::candidate(state, id).await.map(Json)
}

#[instrument(skip(state, request, proof), fields(candidate_id = request.candidate_id))]
#[post("/vote", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: Json<CastVoteRequest>,
    proof: Proof,
) -> Result<Json<VoteRecord>, ApiError> {
    let request = request.into_inner();
    let identity = Identity::new(request.identity)?;
    let record = ElectionProcessor::cast_vote(state, &identity, &proof, request.candidate_id).await?;
    debug!(vote_id = record.id, "Vote recorded");
    Ok(Json(record))
}

#[instrument(skip(state, proof))]
#[post("/reset")]
pub async fn reset(state: &State<AppState>, proof: Option<Proof>) -> Result<Json<MessageResponse>, ApiError> {
    ElectionProcessor::reset(state, proof.as_ref()).await.map(Json)
}

#[get("/tally")]
pub async fn tally(state: &State<AppState>) -> Json<Vec<TallyLine>> {
    Json(ElectionProcessor::tally(state).await)
}

#[get("/votes")]
pub async fn list_votes(state: &State<AppState>) -> Json<Vec<VoteRecord>> {
    Json(ElectionProcessor::votes(state).await)
}
