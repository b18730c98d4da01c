//! Seeds the background-color palette members pick from.
use sqlx::PgPool;

use crate::repos::{color_repo, error::RepoResult};

pub const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("Cotton Candy", "#FFC8DD"),
    ("Peach", "#FFDAB9"),
    ("Lemon", "#FFF3B0"),
    ("Mint", "#CDEAC0"),
    ("Sky", "#BDE0FE"),
    ("Lavender", "#CDB4DB"),
    ("Cloud", "#F1F1F1"),
];

/// Idempotent: existing hex codes are left alone. Returns how many colors were added.
pub async fn seed_default_colors(db: &PgPool) -> RepoResult<usize> {
    let mut added = 0;
    for (name, hex) in DEFAULT_COLORS {
        if color_repo::insert_if_absent(db, name, hex).await? {
            added += 1;
        }
    }

    tracing::info!(added, total = DEFAULT_COLORS.len(), "background colors seeded");
    Ok(added)
}
