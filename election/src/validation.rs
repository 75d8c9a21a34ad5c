pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_IDENTITY_LENGTH: usize = 64;
/// Largest id the `BIGINT` key columns can hold.
pub const MAX_RECORD_ID: u64 = i64::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Candidate name must not be empty")]
    EmptyName,
    #[error("Candidate name exceeds maximum length of {MAX_NAME_LENGTH}")]
    NameTooLong,
    #[error("Identity must not be empty")]
    EmptyIdentity,
    #[error("Identity exceeds maximum length of {MAX_IDENTITY_LENGTH}")]
    IdentityTooLong,
    #[error("Identity must not contain whitespace or control characters")]
    MalformedIdentity,
    #[error("Inconsistent election state: {0}")]
    InconsistentState(String),
}

pub fn validate_candidate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() { return Err(ValidationError::EmptyName); }
    if name.len() > MAX_NAME_LENGTH { return Err(ValidationError::NameTooLong); }
    Ok(())
}

pub fn validate_identity(identity: &str) -> Result<(), ValidationError> {
    if identity.is_empty() { return Err(ValidationError::EmptyIdentity); }
    if identity.len() > MAX_IDENTITY_LENGTH { return Err(ValidationError::IdentityTooLong); }
    if identity.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::MalformedIdentity);
    }
    Ok(())
}
