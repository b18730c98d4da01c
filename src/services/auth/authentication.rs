//! Credential login and token refresh.
//!
//! Both operations resolve the member through [`MemberLookup`] so the flow can run
//! against Postgres in production and an in-memory table in tests.
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::repos::{error::RepoResult, member_repo};
use crate::services::auth::{
    authority::AuthorityUtils, jwt::JwtTokenizer, password::PasswordEncoder,
};

/// What login needs to know about a member.
#[derive(Debug, Clone)]
pub struct MemberCredentials {
    pub member_id: i64,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

#[async_trait]
pub trait MemberLookup: Send + Sync {
    async fn find_credentials_by_email(&self, email: &str) -> RepoResult<Option<MemberCredentials>>;
}

#[derive(Clone, Debug)]
pub struct PgMemberLookup {
    pool: PgPool,
}

impl PgMemberLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberLookup for PgMemberLookup {
    async fn find_credentials_by_email(&self, email: &str) -> RepoResult<Option<MemberCredentials>> {
        let row = member_repo::find_credentials_by_email(&self.pool, email).await?;
        Ok(row.map(|r| MemberCredentials {
            member_id: r.member_id,
            email: r.email,
            password_hash: r.password,
            roles: r.roles,
        }))
    }
}

#[derive(Clone, Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthenticationService {
    members: Arc<dyn MemberLookup>,
    passwords: PasswordEncoder,
    tokenizer: Arc<JwtTokenizer>,
}

impl std::fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationService")
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}

impl AuthenticationService {
    pub fn new(
        members: Arc<dyn MemberLookup>,
        passwords: PasswordEncoder,
        tokenizer: Arc<JwtTokenizer>,
    ) -> Self {
        Self {
            members,
            passwords,
            tokenizer,
        }
    }

    /// Validate email + password and issue an access / refresh token pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedTokens, AppError> {
        let email = username.trim().to_ascii_lowercase();

        let Some(member) = self.members.find_credentials_by_email(&email).await? else {
            // same bcrypt cost as a wrong password, so timing does not reveal the email
            self.passwords.matches_absent(password).await;
            warn!(email = %email, "login failed: unknown member");
            return Err(AppError::Unauthorized);
        };

        if !self.passwords.matches(password, &member.password_hash).await {
            warn!(member_id = member.member_id, "login failed: bad credentials");
            return Err(AppError::Unauthorized);
        }

        let roles = AuthorityUtils::roles_from_names(&member.roles);
        let access_token = self
            .tokenizer
            .generate_access_token(member.member_id, &member.email, &roles)
            .map_err(|_| AppError::Internal)?;
        let refresh_token = self
            .tokenizer
            .generate_refresh_token(&member.email)
            .map_err(|_| AppError::Internal)?;

        info!(member_id = member.member_id, "login succeeded");

        Ok(IssuedTokens {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token with the member's current roles.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.tokenizer.verify_refresh_token(refresh_token).map_err(|e| {
            debug!(error = %e, "refresh token rejected");
            AppError::Unauthorized
        })?;

        let Some(member) = self.members.find_credentials_by_email(&claims.sub).await? else {
            warn!("refresh failed: member no longer exists");
            return Err(AppError::Unauthorized);
        };

        let roles = AuthorityUtils::roles_from_names(&member.roles);
        self.tokenizer
            .generate_access_token(member.member_id, &member.email, &roles)
            .map_err(|_| AppError::Internal)
    }
}
