pub mod auth;
pub mod candidates;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod validation;
pub mod voters;

pub use auth::{Authenticator, Identity, Proof};
pub use engine::{Election, VERSION};
pub use error::{Error, ErrorCode, ErrorResponse, Result};
pub use models::*;
pub use report::{NoopReporter, Reporter};
pub use validation::*;
