//! Stateless bearer token verification.
//!
//! - no `Authorization` header, or a non-bearer scheme: pass through
//! - valid access token: insert `AuthCtx`
//! - expired / invalid token: insert `AuthFailure` and pass through

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::{AuthCtx, AuthFailure};
use crate::services::auth::jwt::JwtError;
use crate::state::AppState;

pub async fn verify_token(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let Some(token) = token else {
        return next.run(req).await;
    };

    match state.tokenizer.verify_access_token(&token) {
        Ok(claims) => {
            let ctx = AuthCtx::from_claims(claims);
            tracing::debug!(member_id = ctx.member_id, jti = ?ctx.jti, "access token verified");
            req.extensions_mut().insert(ctx);
        }
        Err(JwtError::Expired) => {
            tracing::info!("access token expired");
            req.extensions_mut().insert(AuthFailure::Expired);
        }
        Err(err) => {
            tracing::warn!(error = %err, "access token rejected");
            req.extensions_mut().insert(AuthFailure::Invalid);
        }
    }

    next.run(req).await
}
