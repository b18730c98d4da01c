/**
 * Responsibility
 * - the meaning repos pass upward (constraint violations vs. plain db failures)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("unique constraint violated")]
    Conflict,
    #[error("foreign key constraint violated")]
    MissingReference,
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.code().as_deref() {
                Some("23505") => return RepoError::Conflict,
                Some("23503") => return RepoError::MissingReference,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}
