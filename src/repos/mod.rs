/*
 * Responsibility
 * - sqlx access per table; handlers never write SQL
 */
pub mod band_repo;
pub mod color_repo;
pub mod comment_repo;
pub mod error;
pub mod member_repo;
pub mod mention_repo;
pub mod page;
