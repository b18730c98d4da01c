/*
 * Responsibility
 * - router-level layers, each behind its own apply()
 * - app.rs decides the order they wrap the router in
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
