//! HS256 access / refresh token issuance and verification.
//!
//! Access tokens carry the principal (member id, email, roles) so requests can be
//! authorized without a database round trip. Refresh tokens only carry the subject.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::authority::Role;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("jwt secret key must not be empty")]
    EmptySecret,
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("expected a {expected:?} token")]
    WrongKind { expected: TokenKind },
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        if matches!(e.kind(), ErrorKind::ExpiredSignature) {
            JwtError::Expired
        } else {
            JwtError::Invalid(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub typ: TokenKind,
    pub member_id: i64,
    pub username: String,
    pub roles: Vec<String>,
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub typ: TokenKind,
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtTokenizer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiration_minutes: i64,
    refresh_token_expiration_minutes: i64,
}

impl std::fmt::Debug for JwtTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtTokenizer")
            .field(
                "access_token_expiration_minutes",
                &self.access_token_expiration_minutes,
            )
            .field(
                "refresh_token_expiration_minutes",
                &self.refresh_token_expiration_minutes,
            )
            .finish()
    }
}

impl JwtTokenizer {
    pub fn new(
        secret_key: &str,
        access_token_expiration_minutes: i64,
        refresh_token_expiration_minutes: i64,
    ) -> Result<Self, JwtError> {
        if secret_key.trim().is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
            access_token_expiration_minutes,
            refresh_token_expiration_minutes,
        })
    }

    pub fn generate_access_token(
        &self,
        member_id: i64,
        email: &str,
        roles: &[Role],
    ) -> Result<String, JwtError> {
        self.access_token_at(member_id, email, roles, Utc::now())
    }

    pub fn generate_refresh_token(&self, email: &str) -> Result<String, JwtError> {
        self.refresh_token_at(email, Utc::now())
    }

    pub(crate) fn access_token_at(
        &self,
        member_id: i64,
        email: &str,
        roles: &[Role],
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = issued_at + Duration::minutes(self.access_token_expiration_minutes);
        let claims = AccessClaims {
            typ: TokenKind::Access,
            member_id,
            username: email.to_string(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            sub: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };
        self.sign(&claims)
    }

    pub(crate) fn refresh_token_at(
        &self,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = issued_at + Duration::minutes(self.refresh_token_expiration_minutes);
        let claims = RefreshClaims {
            typ: TokenKind::Refresh,
            sub: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };
        self.sign(&claims)
    }

    /// Verify signature and expiry, then require an access token.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let claims = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?
            .claims;

        if claims.typ != TokenKind::Access {
            return Err(JwtError::WrongKind {
                expected: TokenKind::Access,
            });
        }
        Ok(claims)
    }

    /// Verify signature and expiry, then require a refresh token.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        let claims =
            jsonwebtoken::decode::<RefreshClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.typ != TokenKind::Refresh {
            return Err(JwtError::WrongKind {
                expected: TokenKind::Refresh,
            });
        }
        Ok(claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign JWT");
            JwtError::Signing(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> JwtTokenizer {
        JwtTokenizer::new("band-secret-key-for-tests-0123456789", 30, 420).unwrap()
    }

    #[test]
    fn access_token_round_trip() {
        let t = tokenizer();
        let token = t
            .generate_access_token(7, "hgd@band.io", &[Role::User])
            .unwrap();

        let claims = t.verify_access_token(&token).unwrap();
        assert_eq!(claims.member_id, 7);
        assert_eq!(claims.username, "hgd@band.io");
        assert_eq!(claims.sub, "hgd@band.io");
        assert_eq!(claims.roles, vec!["USER".to_string()]);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn expired_access_token_is_reported_as_expired() {
        let t = tokenizer();
        let issued = Utc::now() - Duration::hours(2);
        let token = t.access_token_at(1, "a@band.io", &[Role::User], issued).unwrap();

        assert!(matches!(t.verify_access_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenizer::new("another-secret-entirely-9876543210", 30, 420).unwrap();
        let token = other
            .generate_access_token(1, "a@band.io", &[Role::User])
            .unwrap();

        assert!(matches!(
            tokenizer().verify_access_token(&token),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            tokenizer().verify_access_token("not.a.jwt"),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let t = tokenizer();
        let refresh = t.generate_refresh_token("a@band.io").unwrap();

        assert!(t.verify_access_token(&refresh).is_err());
        let claims = t.verify_refresh_token(&refresh).unwrap();
        assert_eq!(claims.sub, "a@band.io");
        assert_eq!(claims.exp - claims.iat, 420 * 60);
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let t = tokenizer();
        let access = t
            .generate_access_token(1, "a@band.io", &[Role::User])
            .unwrap();

        assert!(matches!(
            t.verify_refresh_token(&access),
            Err(JwtError::WrongKind {
                expected: TokenKind::Refresh
            })
        ));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            JwtTokenizer::new("  ", 30, 420),
            Err(JwtError::EmptySecret)
        ));
    }
}
