/*
 * Responsibility
 * - /users handlers: sign-up, search, current member, patch, delete, logout
 * - patch / delete are limited to the member themselves or an ADMIN
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    api::{
        dto::{
            members::{MemberListQuery, MemberPatchDto, MemberPostDto, MemberResponse},
            page::{MultiResponse, SingleResponse},
            page_request,
        },
        extractors::{ApiJson, ApiPath, ApiQuery, AuthCtxExtractor},
        handlers::created_location,
    },
    error::AppError,
    mapper::members::{
        member_patch_to_changes, member_post_to_new_member, member_to_response,
    },
    repos::{
        error::RepoError,
        member_repo::{self, MemberFilter},
    },
    state::AppState,
};

const MEMBER_DEFAULT_URL: &str = "/users";

/// Sign-up. Answers 201 with `Location` and no body.
pub async fn post_member(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MemberPostDto>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let password_hash = state.passwords.encode(&req.password).await?;
    let roles = state.authority.create_roles(&req.email);
    let member = member_post_to_new_member(req, password_hash, &roles);

    let row = member_repo::create(&state.db, &member)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("email already registered"),
            RepoError::MissingReference => AppError::bad_request("bgColorId does not exist"),
            other => other.into(),
        })?;

    tracing::info!(member_id = row.member_id, "member signed up");

    Ok((
        StatusCode::CREATED,
        created_location(MEMBER_DEFAULT_URL, row.member_id),
    ))
}

/// `?mbtitype=` or `?interestingtype=` search a page of members; with neither,
/// the authenticated member is returned.
pub async fn get_members(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiQuery(query): ApiQuery<MemberListQuery>,
) -> Result<Response, AppError> {
    let filter = match (query.mbtitype, query.interestingtype) {
        (Some(_), Some(_)) => {
            return Err(AppError::bad_request(
                "use either mbtitype or interestingtype, not both",
            ));
        }
        (Some(mbti), None) => MemberFilter::Mbti(mbti.trim().to_ascii_uppercase()),
        (None, Some(interesting)) => MemberFilter::Interesting(interesting.trim().to_string()),
        (None, None) => {
            let row = member_repo::get(&state.db, ctx.member_id)
                .await?
                .ok_or(AppError::not_found("Member"))?;
            return Ok(Json(SingleResponse::new(member_to_response(row))).into_response());
        }
    };

    let page = page_request(query.page, query.size).map_err(AppError::Validation)?;
    let rows = member_repo::search(&state.db, &filter, page).await?;

    let res: MultiResponse<MemberResponse> = rows.map(member_to_response).into();
    Ok(Json(res).into_response())
}

pub async fn get_member(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<i64>,
) -> Result<Json<SingleResponse<MemberResponse>>, AppError> {
    let row = member_repo::get(&state.db, member_id)
        .await?
        .ok_or(AppError::not_found("Member"))?;

    Ok(Json(SingleResponse::new(member_to_response(row))))
}

pub async fn patch_member(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(member_id): ApiPath<i64>,
    ApiJson(req): ApiJson<MemberPatchDto>,
) -> Result<Json<SingleResponse<MemberResponse>>, AppError> {
    ctx.ensure_can_act_for(member_id)?;
    req.validate()?;

    let password_hash = match &req.password {
        Some(raw) => Some(state.passwords.encode(raw).await?),
        None => None,
    };
    let changes = member_patch_to_changes(req, password_hash);

    let row = member_repo::update(&state.db, member_id, &changes)
        .await
        .map_err(|e| match e {
            RepoError::MissingReference => AppError::bad_request("bgColorId does not exist"),
            other => other.into(),
        })?
        .ok_or(AppError::not_found("Member"))?;

    Ok(Json(SingleResponse::new(member_to_response(row))))
}

pub async fn delete_member(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ApiPath(member_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    ctx.ensure_can_act_for(member_id)?;

    if member_repo::delete(&state.db, member_id).await? {
        tracing::info!(member_id, by = ctx.member_id, "member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Member"))
    }
}

/// Tokens are stateless, so logout only sends the client home.
pub async fn logout() -> Redirect {
    Redirect::to("/")
}
