/*
 * Responsibility
 * - /bands handlers
 * - the creator (or an ADMIN) may patch / delete a band
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    api::{
        dto::{
            bands::{BandPatchDto, BandPostDto, BandResponse},
            page::{MultiResponse, PageQuery, SingleResponse},
            page_request,
        },
        extractors::{ApiJson, ApiPath, ApiQuery, AuthCtxExtractor},
        handlers::created_location,
    },
    error::AppError,
    mapper::bands::{band_patch_to_changes, band_post_to_new_band, band_to_response},
    repos::{band_repo, error::RepoError},
    state::AppState,
};

const BAND_DEFAULT_URL: &str = "/bands";

fn band_conflict(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => AppError::conflict("band already exists for this school class"),
        other => other.into(),
    }
}

pub async fn post_band(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiJson(req): ApiJson<BandPostDto>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let join_pass_hash = state.passwords.encode(&req.join_pass).await?;
    let band = band_post_to_new_band(req, join_pass_hash, ctx.member_id);

    let row = band_repo::create(&state.db, &band)
        .await
        .map_err(band_conflict)?;

    tracing::info!(band_id = row.band_id, member_id = ctx.member_id, "band created");

    Ok((
        StatusCode::CREATED,
        created_location(BAND_DEFAULT_URL, row.band_id),
        Json(SingleResponse::new(band_to_response(row))),
    ))
}

pub async fn get_bands(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<MultiResponse<BandResponse>>, AppError> {
    let page = page_request(query.page, query.size).map_err(AppError::Validation)?;
    let rows = band_repo::list(&state.db, page).await?;

    Ok(Json(rows.map(band_to_response).into()))
}

pub async fn get_band(
    State(state): State<AppState>,
    ApiPath(band_id): ApiPath<i64>,
) -> Result<Json<SingleResponse<BandResponse>>, AppError> {
    let row = band_repo::get(&state.db, band_id)
        .await?
        .ok_or(AppError::not_found("Band"))?;

    Ok(Json(SingleResponse::new(band_to_response(row))))
}

pub async fn patch_band(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(band_id): ApiPath<i64>,
    ApiJson(req): ApiJson<BandPatchDto>,
) -> Result<Json<SingleResponse<BandResponse>>, AppError> {
    let current = band_repo::get(&state.db, band_id)
        .await?
        .ok_or(AppError::not_found("Band"))?;
    ctx.ensure_can_act_for(current.member_id)?;
    req.validate(current.school_code, current.grade)?;

    let join_pass_hash = match &req.join_pass {
        Some(raw) => Some(state.passwords.encode(raw).await?),
        None => None,
    };
    let changes = band_patch_to_changes(req, join_pass_hash);

    let row = band_repo::update(&state.db, band_id, &changes)
        .await
        .map_err(band_conflict)?
        .ok_or(AppError::not_found("Band"))?;

    Ok(Json(SingleResponse::new(band_to_response(row))))
}

pub async fn delete_band(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(band_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let current = band_repo::get(&state.db, band_id)
        .await?
        .ok_or(AppError::not_found("Band"))?;
    ctx.ensure_can_act_for(current.member_id)?;

    if band_repo::delete(&state.db, band_id).await? {
        tracing::info!(band_id, by = ctx.member_id, "band deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Band"))
    }
}
