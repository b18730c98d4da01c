/*
 * Responsibility
 * - crate root: module tree shared by the binary and the tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod mapper;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
