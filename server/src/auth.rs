use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use election::{Authenticator, Identity, Proof};
use ring::hmac;
use std::fmt;
use tracing::warn;

/// Bearer tokens are `base64url(HMAC-SHA256(secret, identity))`.
pub struct HmacAuthenticator {
    key: hmac::Key,
}

impl fmt::Debug for HmacAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacAuthenticator(..)")
    }
}

impl HmacAuthenticator {
    pub fn new(secret: &[u8]) -> Self {
        Self { key: hmac::Key::new(hmac::HMAC_SHA256, secret) }
    }

    /// Mints the token a caller must present to act as `identity`.
    pub fn issue(&self, identity: &Identity) -> String {
        let tag = hmac::sign(&self.key, identity.as_str().as_bytes());
        URL_SAFE_NO_PAD.encode(tag.as_ref())
    }
}

impl Authenticator for HmacAuthenticator {
    fn authenticate(&self, identity: &Identity, proof: &Proof) -> bool {
        let Ok(tag) = URL_SAFE_NO_PAD.decode(proof.as_str()) else {
            warn!(%identity, "Bearer token is not valid base64");
            return false;
        };

        let verified = hmac::verify(&self.key, identity.as_str().as_bytes(), &tag).is_ok();
        if !verified {
            warn!(%identity, "Bearer token rejected");
        }
        verified
    }
}
