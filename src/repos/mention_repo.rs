/*
 * Responsibility
 * - mentions: a member tagged in a guestbook comment
 * - both FKs cascade, so deleting the comment or the member removes the mention
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::page::{Page, PageRequest};

#[derive(Debug, Clone, FromRow)]
pub struct MentionRow {
    pub mention_id: i64,
    pub comment_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMention {
    pub comment_id: i64,
    pub member_id: i64,
}

pub async fn create(db: &PgPool, mention: &NewMention) -> RepoResult<MentionRow> {
    let row = sqlx::query_as::<_, MentionRow>(
        r#"
        WITH x AS (
            INSERT INTO mentions (comment_id, member_id)
            VALUES ($1, $2)
            RETURNING *
        )
        SELECT x.mention_id, x.comment_id, x.member_id, m.name AS member_name, x.created_at
        FROM x
        JOIN members m ON m.member_id = x.member_id
        "#,
    )
    .bind(mention.comment_id)
    .bind(mention.member_id)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, mention_id: i64) -> RepoResult<Option<MentionRow>> {
    let row = sqlx::query_as::<_, MentionRow>(
        r#"
        SELECT x.mention_id, x.comment_id, x.member_id, m.name AS member_name, x.created_at
        FROM mentions x
        JOIN members m ON m.member_id = x.member_id
        WHERE x.mention_id = $1
        "#,
    )
    .bind(mention_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list_by_member(
    db: &PgPool,
    member_id: i64,
    page: PageRequest,
) -> RepoResult<Page<MentionRow>> {
    let items = sqlx::query_as::<_, MentionRow>(
        r#"
        SELECT x.mention_id, x.comment_id, x.member_id, m.name AS member_name, x.created_at
        FROM mentions x
        JOIN members m ON m.member_id = x.member_id
        WHERE x.member_id = $1
        ORDER BY x.mention_id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(member_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(db)
    .await?;

    let total_elements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mentions WHERE member_id = $1")
        .bind(member_id)
        .fetch_one(db)
        .await?;

    Ok(Page {
        items,
        request: page,
        total_elements,
    })
}

pub async fn delete(db: &PgPool, mention_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM mentions
        WHERE mention_id = $1
        "#,
    )
    .bind(mention_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
