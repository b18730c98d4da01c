//! Policy enforcement: 401 when a protected route has no principal, 403 when the
//! principal lacks the required role.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::extractors::{AuthCtx, AuthFailure};
use crate::error::AppError;
use crate::services::auth::policy::Decision;
use crate::state::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let roles = req.extensions().get::<AuthCtx>().map(|ctx| ctx.roles.as_slice());

    match state.policy.authorize(req.method(), req.uri().path(), roles) {
        Decision::Permit => Ok(next.run(req).await),
        Decision::Unauthenticated => {
            let cause = req.extensions().get::<AuthFailure>().copied();
            tracing::info!(
                method = %req.method(),
                path = %req.uri().path(),
                cause = ?cause,
                "authentication required"
            );
            Err(AppError::Unauthorized)
        }
        Decision::Denied => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "access denied"
            );
            Err(AppError::Forbidden)
        }
    }
}
