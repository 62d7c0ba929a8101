use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use pinboard_types::api::Claims;
use pinboard_types::models::Identity;
use thiserror::Error;

pub const DEFAULT_TTL_SECS: i64 = 3600;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token has expired")]
    Expired,

    #[error("{0}")]
    Invalid(String),

    #[error("failed to sign token: {0}")]
    Encode(String),
}

/// Issues and verifies stateless HS256 session tokens. Nothing is stored
/// server side; a token is valid while its signature checks out and its
/// `exp` has not passed.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        // No grace period: a token is dead the second its `exp` passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Encode(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_types::models::Role;

    fn admin() -> Identity {
        Identity { id: 1, username: "admin".into(), role: Role::Admin }
    }

    #[test]
    fn issued_token_verifies_and_carries_identity() {
        let issuer = SessionIssuer::new("secret", Duration::seconds(DEFAULT_TTL_SECS));
        let token = issuer.issue(&admin()).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.identity(), admin());
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL_SECS as usize);
    }

    #[test]
    fn token_expired_seconds_ago_is_rejected() {
        let issuer = SessionIssuer::new("secret", Duration::seconds(-5));
        let token = issuer.issue(&admin()).unwrap();
        assert!(matches!(issuer.verify(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let issuer = SessionIssuer::new("secret", Duration::seconds(-600));
        let token = issuer.issue(&admin()).unwrap();
        assert!(matches!(issuer.verify(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let ours = SessionIssuer::new("secret", Duration::hours(1));
        let theirs = SessionIssuer::new("other-secret", Duration::hours(1));
        let token = theirs.issue(&admin()).unwrap();
        assert!(matches!(ours.verify(&token), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        let issuer = SessionIssuer::new("secret", Duration::hours(1));
        assert!(matches!(issuer.verify("invalid_token"), Err(SessionError::Invalid(_))));
    }
}
