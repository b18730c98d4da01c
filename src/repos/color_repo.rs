use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct BgColorRow {
    pub bg_color_id: i64,
    pub color_name: String,
    pub hex_code: String,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<BgColorRow>> {
    let rows = sqlx::query_as::<_, BgColorRow>(
        r#"
        SELECT bg_color_id, color_name, hex_code
        FROM bg_colors
        ORDER BY bg_color_id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, bg_color_id: i64) -> RepoResult<Option<BgColorRow>> {
    let row = sqlx::query_as::<_, BgColorRow>(
        r#"
        SELECT bg_color_id, color_name, hex_code
        FROM bg_colors
        WHERE bg_color_id = $1
        "#,
    )
    .bind(bg_color_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Insert unless the hex code already exists. Returns true when a row was added.
pub async fn insert_if_absent(db: &PgPool, color_name: &str, hex_code: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO bg_colors (color_name, hex_code)
        VALUES ($1, $2)
        ON CONFLICT (hex_code) DO NOTHING
        "#,
    )
    .bind(color_name)
    .bind(hex_code)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
