/*
 * Responsibility
 * - shared context handed to handlers and middleware (AppState)
 * - Clone is cheap: the pool and the services are reference counted
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::auth::{
    AuthenticationService, AuthorityUtils, JwtTokenizer, PasswordEncoder, SecurityPolicy,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokenizer: Arc<JwtTokenizer>,
    pub authentication: Arc<AuthenticationService>,
    pub policy: Arc<SecurityPolicy>,
    pub passwords: PasswordEncoder,
    pub authority: AuthorityUtils,
}

impl AppState {
    pub fn new(
        db: PgPool,
        tokenizer: Arc<JwtTokenizer>,
        authentication: Arc<AuthenticationService>,
        policy: SecurityPolicy,
        passwords: PasswordEncoder,
        authority: AuthorityUtils,
    ) -> Self {
        Self {
            db,
            tokenizer,
            authentication,
            policy: Arc::new(policy),
            passwords,
            authority,
        }
    }
}
