/*
 * Responsibility
 * - /comments handlers (guestbook entries)
 * - edit: author or ADMIN; delete: author, guestbook owner or ADMIN
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    api::{
        dto::{
            comments::{CommentListQuery, CommentPatchDto, CommentPostDto, CommentResponse},
            page::{MultiResponse, SingleResponse},
            page_request,
        },
        extractors::{ApiJson, ApiPath, ApiQuery, AuthCtxExtractor},
        handlers::created_location,
    },
    error::{AppError, FieldError},
    mapper::comments::{comment_post_to_new_comment, comment_to_response},
    repos::{comment_repo, error::RepoError},
    state::AppState,
};

const COMMENT_DEFAULT_URL: &str = "/comments";

pub async fn post_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiJson(req): ApiJson<CommentPostDto>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let comment = comment_post_to_new_comment(req, ctx.member_id);
    let row = comment_repo::create(&state.db, &comment)
        .await
        .map_err(|e| match e {
            RepoError::MissingReference => AppError::not_found("Member"),
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        created_location(COMMENT_DEFAULT_URL, row.comment_id),
        Json(SingleResponse::new(comment_to_response(row))),
    ))
}

pub async fn get_comments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CommentListQuery>,
) -> Result<Json<MultiResponse<CommentResponse>>, AppError> {
    if query.owner_id < 1 {
        return Err(FieldError::new("ownerId", "must be positive").into());
    }
    let page = page_request(query.page, query.size).map_err(AppError::Validation)?;
    let rows = comment_repo::list_by_owner(&state.db, query.owner_id, page).await?;

    Ok(Json(rows.map(comment_to_response).into()))
}

pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<i64>,
) -> Result<Json<SingleResponse<CommentResponse>>, AppError> {
    let row = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("Comment"))?;

    Ok(Json(SingleResponse::new(comment_to_response(row))))
}

pub async fn patch_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(comment_id): ApiPath<i64>,
    ApiJson(req): ApiJson<CommentPatchDto>,
) -> Result<Json<SingleResponse<CommentResponse>>, AppError> {
    let current = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("Comment"))?;
    ctx.ensure_can_act_for(current.author_id)?;
    req.validate()?;

    let row = comment_repo::update_content(&state.db, comment_id, req.content.trim())
        .await?
        .ok_or(AppError::not_found("Comment"))?;

    Ok(Json(SingleResponse::new(comment_to_response(row))))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(comment_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let current = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("Comment"))?;

    // the guestbook owner may remove entries left on their page
    if ctx.member_id != current.owner_id {
        ctx.ensure_can_act_for(current.author_id)?;
    }

    if comment_repo::delete(&state.db, comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Comment"))
    }
}
