/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the verified principal (AuthCtx) to handlers
 * - axum plumbing lives in core, the contract types in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - AuthFailure
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::{AuthCtx, AuthFailure};
