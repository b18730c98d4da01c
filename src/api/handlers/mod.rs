/*
 * Responsibility
 * - one module per resource; handlers validate, map, call repos and wrap responses
 * - ownership checks (self / creator / author or ADMIN) happen here
 */
use axum::http::{HeaderName, header};

pub mod auth;
pub mod bands;
pub mod colors;
pub mod comments;
pub mod health;
pub mod members;
pub mod mentions;

/// `Location` header for a newly created resource.
pub(crate) fn created_location(base: &str, id: i64) -> [(HeaderName, String); 1] {
    [(header::LOCATION, format!("{base}/{id}"))]
}
