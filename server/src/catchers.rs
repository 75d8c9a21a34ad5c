use election::{ErrorCode, ErrorResponse};
use rocket::{Request, catch, serde::json::Json};

// Same body as `ApiError`, so clients can branch on `code` alone.
fn body(error: &str, code: ErrorCode) -> Json<ErrorResponse> {
    Json(ErrorResponse { error: error.into(), code })
}

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorResponse> {
    body("A valid bearer token is required for this action.", ErrorCode::Unauthorized)
}

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    body("Invalid request parameters.", ErrorCode::InvalidInput)
}

#[catch(409)]
pub fn conflict(_req: &Request) -> Json<ErrorResponse> {
    body("This identity has already voted.", ErrorCode::AlreadyVoted)
}

#[catch(422)]
pub fn unprocessable_entity(_req: &Request) -> Json<ErrorResponse> {
    body("Malformed request body.", ErrorCode::InvalidInput)
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    body("An internal server error occurred.", ErrorCode::SystemError)
}

/// Unmatched routes; a missing candidate on a real route is reported by
/// `ApiError` as `unknownCandidate` instead.
#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    body("The requested resource was not found.", ErrorCode::InvalidInput)
}
