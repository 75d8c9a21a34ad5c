use election::{ErrorCode, ErrorResponse};
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Election(#[from] election::Error),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e.to_string())
    }
}

impl From<election::ValidationError> for ApiError {
    fn from(e: election::ValidationError) -> Self {
        ApiError::Election(e.into())
    }
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Election(e) => e.code,
            ApiError::Database(_) => ErrorCode::SystemError,
        }
    }

    pub fn status(&self) -> Status {
        match self.code() {
            ErrorCode::Unauthorized => Status::Unauthorized,
            ErrorCode::AlreadyVoted => Status::Conflict,
            ErrorCode::UnknownCandidate => Status::NotFound,
            ErrorCode::InvalidInput => Status::BadRequest,
            ErrorCode::SystemError => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = match &self {
            ApiError::Election(e) => e.to_response(),
            ApiError::Database(msg) => {
                error!("{}", msg);
                ErrorResponse {
                    error: "Failed to persist election state".into(),
                    code: ErrorCode::SystemError,
                }
            }
        };

        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
