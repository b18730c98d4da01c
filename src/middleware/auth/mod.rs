//! Request authentication and authorization.
//!
//! Two layers, applied around the whole router:
//! - `verification` (outer): `Authorization: Bearer <jwt>` -> `AuthCtx` in extensions
//! - `authorization` (inner): `SecurityPolicy` decides pass / 401 / 403
//!
//! Verification never rejects on its own; a bad token only matters on routes the
//! policy protects.

use axum::{Router, middleware};

use crate::state::AppState;

pub mod authorization;
pub mod verification;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // the layer added last runs first
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorization::authorize,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            verification::verify_token,
        ))
}

#[cfg(test)]
mod tests;
