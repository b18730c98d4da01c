/*
 * Responsibility
 * - guestbook comments: owner_id is the member whose page it is, author_id who wrote it
 * - reads join members for the author's display name
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::page::{Page, PageRequest};

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub comment_id: i64,
    pub owner_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub owner_id: i64,
    pub author_id: i64,
    pub content: String,
}

const SELECT_COMMENT: &str = r#"
    SELECT
        c.comment_id, c.owner_id, c.author_id, a.name AS author_name,
        c.content, c.created_at, c.modified_at
"#;

pub async fn create(db: &PgPool, comment: &NewComment) -> RepoResult<CommentRow> {
    let sql = format!(
        r#"
        WITH c AS (
            INSERT INTO comments (owner_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
        )
        {SELECT_COMMENT}
        FROM c
        JOIN members a ON a.member_id = c.author_id
        "#
    );
    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(comment.owner_id)
        .bind(comment.author_id)
        .bind(&comment.content)
        .fetch_one(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, comment_id: i64) -> RepoResult<Option<CommentRow>> {
    let sql = format!(
        r#"
        {SELECT_COMMENT}
        FROM comments c
        JOIN members a ON a.member_id = c.author_id
        WHERE c.comment_id = $1
        "#
    );
    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(comment_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn list_by_owner(
    db: &PgPool,
    owner_id: i64,
    page: PageRequest,
) -> RepoResult<Page<CommentRow>> {
    let sql = format!(
        r#"
        {SELECT_COMMENT}
        FROM comments c
        JOIN members a ON a.member_id = c.author_id
        WHERE c.owner_id = $1
        ORDER BY c.comment_id DESC
        LIMIT $2 OFFSET $3
        "#
    );
    let items = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(owner_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(db)
        .await?;

    let total_elements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(db)
        .await?;

    Ok(Page {
        items,
        request: page,
        total_elements,
    })
}

pub async fn update_content(
    db: &PgPool,
    comment_id: i64,
    content: &str,
) -> RepoResult<Option<CommentRow>> {
    let sql = format!(
        r#"
        WITH c AS (
            UPDATE comments
            SET content = $2, modified_at = now()
            WHERE comment_id = $1
            RETURNING *
        )
        {SELECT_COMMENT}
        FROM c
        JOIN members a ON a.member_id = c.author_id
        "#
    );
    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(comment_id)
        .bind(content)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, comment_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
