/*
 * Responsibility
 * - /mentions handlers
 * - only the comment's author may mention members in it
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    api::{
        dto::{
            mentions::{MentionListQuery, MentionPostDto, MentionResponse},
            page::{MultiResponse, SingleResponse},
            page_request,
        },
        extractors::{ApiJson, ApiPath, ApiQuery, AuthCtxExtractor},
    },
    error::{AppError, FieldError},
    mapper::mentions::{mention_post_to_new_mention, mention_to_response},
    repos::{comment_repo, error::RepoError, mention_repo},
    state::AppState,
};

pub async fn post_mention(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiJson(req): ApiJson<MentionPostDto>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let comment = comment_repo::get(&state.db, req.comment_id)
        .await?
        .ok_or(AppError::not_found("Comment"))?;
    if comment.author_id != ctx.member_id {
        tracing::warn!(
            comment_id = comment.comment_id,
            principal = ctx.member_id,
            "mention attempted on another member's comment"
        );
        return Err(AppError::Forbidden);
    }

    let mention = mention_post_to_new_mention(req);
    let row = mention_repo::create(&state.db, &mention)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("member already mentioned in this comment"),
            RepoError::MissingReference => AppError::not_found("Member"),
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(SingleResponse::new(mention_to_response(row))),
    ))
}

pub async fn get_mentions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MentionListQuery>,
) -> Result<Json<MultiResponse<MentionResponse>>, AppError> {
    if query.member_id < 1 {
        return Err(FieldError::new("memberId", "must be positive").into());
    }
    let page = page_request(query.page, query.size).map_err(AppError::Validation)?;
    let rows = mention_repo::list_by_member(&state.db, query.member_id, page).await?;

    Ok(Json(rows.map(mention_to_response).into()))
}

/// Allowed for the author of the comment holding the mention, or an ADMIN.
pub async fn delete_mention(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(mention_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let mention = mention_repo::get(&state.db, mention_id)
        .await?
        .ok_or(AppError::not_found("Mention"))?;
    let comment = comment_repo::get(&state.db, mention.comment_id)
        .await?
        .ok_or(AppError::not_found("Comment"))?;
    ctx.ensure_can_act_for(comment.author_id)?;

    if mention_repo::delete(&state.db, mention_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Mention"))
    }
}
