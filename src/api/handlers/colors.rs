//! Public, read-only background color palette.
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{colors::ColorResponse, page::SingleResponse},
        extractors::ApiPath,
    },
    error::AppError,
    mapper::colors::{color_to_response, colors_to_responses},
    repos::color_repo,
    state::AppState,
};

pub async fn get_colors(
    State(state): State<AppState>,
) -> Result<Json<SingleResponse<Vec<ColorResponse>>>, AppError> {
    let rows = color_repo::list(&state.db).await?;
    Ok(Json(SingleResponse::new(colors_to_responses(rows))))
}

pub async fn get_color(
    State(state): State<AppState>,
    ApiPath(bg_color_id): ApiPath<i64>,
) -> Result<Json<SingleResponse<ColorResponse>>, AppError> {
    let row = color_repo::get(&state.db, bg_color_id)
        .await?
        .ok_or(AppError::not_found("Color"))?;

    Ok(Json(SingleResponse::new(color_to_response(row))))
}
