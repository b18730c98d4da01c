/*
 * Responsibility
 * - POST /auth/login: credentials -> Authorization + Refresh response headers
 * - POST /auth/refresh: Refresh request header -> new Authorization header
 */
use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{dto::auth::LoginDto, extractors::ApiJson},
    error::AppError,
    middleware::cors::REFRESH_HEADER,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let tokens = state
        .authentication
        .login(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)),
            (HeaderName::from_static(REFRESH_HEADER), tokens.refresh_token),
        ],
    ))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token = headers
        .get(REFRESH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let access_token = state.authentication.refresh(refresh_token).await?;

    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, format!("Bearer {access_token}"))],
    ))
}
