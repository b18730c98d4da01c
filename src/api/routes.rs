/*
 * Responsibility
 * - URL structure of the service
 * - which routes need a principal is decided by SecurityPolicy, not here
 */
use axum::{
    Router,
    routing::{any, delete, get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    auth::{login, refresh},
    bands::{delete_band, get_band, get_bands, patch_band, post_band},
    colors::{get_color, get_colors},
    comments::{delete_comment, get_comment, get_comments, patch_comment, post_comment},
    health::health,
    members::{delete_member, get_member, get_members, logout, patch_member, post_member},
    mentions::{delete_mention, get_mentions, post_mention},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/users", get(get_members).post(post_member))
        .route("/users/logout", any(logout))
        .route(
            "/users/{member_id}",
            get(get_member).patch(patch_member).delete(delete_member),
        )
        .route("/bands", get(get_bands).post(post_band))
        .route(
            "/bands/{band_id}",
            get(get_band).patch(patch_band).delete(delete_band),
        )
        .route("/colors", get(get_colors))
        .route("/colors/{bg_color_id}", get(get_color))
        .route("/comments", get(get_comments).post(post_comment))
        .route(
            "/comments/{comment_id}",
            get(get_comment).patch(patch_comment).delete(delete_comment),
        )
        .route("/mentions", get(get_mentions).post(post_mention))
        .route("/mentions/{mention_id}", delete(delete_mention))
}
