/*
 * Responsibility
 * - request extractors shared by handlers
 * - every rejection becomes an AppError so clients always get the JSON error body
 */
mod auth_ctx;
mod request;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor, AuthFailure};
pub use request::{ApiJson, ApiPath, ApiQuery};
