use serde::{Serialize, Deserialize};
use std::fmt;

use crate::validation::{validate_identity, ValidationError};

/// The principal an action is performed on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    pub fn new(identity: impl Into<String>) -> Result<Self, ValidationError> {
        let identity = identity.into();
        validate_identity(&identity)?;
        Ok(Self(identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque evidence presented by a caller that it may act as some identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Proof(String);

impl Proof {
    pub fn new(proof: impl Into<String>) -> Self {
        Self(proof.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Proof(..)")
    }
}

/// External identity collaborator. The engine trusts a `true` answer.
pub trait Authenticator {
    fn authenticate(&self, identity: &Identity, proof: &Proof) -> bool;
}

impl<T: Authenticator + ?Sized> Authenticator for &T {
    fn authenticate(&self, identity: &Identity, proof: &Proof) -> bool {
        (**self).authenticate(identity, proof)
    }
}

// Rocket request guard for bearer proofs
#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::http::Status;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for Proof {
        type Error = &'static str;

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let Some(header) = req.headers().get_one("Authorization") else {
                return Outcome::Error((Status::Unauthorized, "missing Authorization header"));
            };

            match header.strip_prefix("Bearer ").map(str::trim) {
                Some(token) if !token.is_empty() => Outcome::Success(Proof::new(token)),
                _ => Outcome::Error((Status::Unauthorized, "malformed bearer token")),
            }
        }
    }
}
