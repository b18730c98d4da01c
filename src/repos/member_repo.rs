/*
 * Responsibility
 * - members table (joined with bg_colors for reads)
 * - the password hash is only ever read through find_credentials_by_email
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::page::{Page, PageRequest};

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub member_id: i64,
    pub email: String,
    pub name: String,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    // LEFT JOIN bg_colors: all three are NULL when no color is chosen
    pub bg_color_id: Option<i64>,
    pub color_name: Option<String>,
    pub hex_code: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CredentialsRow {
    pub member_id: i64,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    pub bg_color_id: Option<i64>,
    pub roles: Vec<String>,
}

/// Partial update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    // Some(None) clears the color
    pub bg_color_id: Option<Option<i64>>,
}

/// Filter for the paged member search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFilter {
    Mbti(String),
    Interesting(String),
}

const SELECT_MEMBER: &str = r#"
    SELECT
        m.member_id, m.email, m.name, m.mbti, m.interesting,
        m.bg_color_id, c.color_name, c.hex_code,
        m.roles, m.created_at, m.modified_at
    FROM members m
    LEFT JOIN bg_colors c ON c.bg_color_id = m.bg_color_id
"#;

pub async fn create(db: &PgPool, member: &NewMember) -> RepoResult<MemberRow> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        WITH m AS (
            INSERT INTO members (email, password, name, mbti, interesting, bg_color_id, roles)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        )
        SELECT
            m.member_id, m.email, m.name, m.mbti, m.interesting,
            m.bg_color_id, c.color_name, c.hex_code,
            m.roles, m.created_at, m.modified_at
        FROM m
        LEFT JOIN bg_colors c ON c.bg_color_id = m.bg_color_id
        "#,
    )
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(&member.name)
    .bind(&member.mbti)
    .bind(&member.interesting)
    .bind(member.bg_color_id)
    .bind(&member.roles)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, member_id: i64) -> RepoResult<Option<MemberRow>> {
    let sql = format!("{SELECT_MEMBER} WHERE m.member_id = $1");
    let row = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(member_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn find_credentials_by_email(
    db: &PgPool,
    email: &str,
) -> RepoResult<Option<CredentialsRow>> {
    let row = sqlx::query_as::<_, CredentialsRow>(
        r#"
        SELECT member_id, email, password, roles
        FROM members
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn search(
    db: &PgPool,
    filter: &MemberFilter,
    page: PageRequest,
) -> RepoResult<Page<MemberRow>> {
    let (column, value) = match filter {
        MemberFilter::Mbti(v) => ("mbti", v),
        MemberFilter::Interesting(v) => ("interesting", v),
    };

    let sql = format!(
        "{SELECT_MEMBER} WHERE m.{column} = $1 ORDER BY m.member_id DESC LIMIT $2 OFFSET $3"
    );
    let items = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(value)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(db)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM members WHERE {column} = $1");
    let total_elements: i64 = sqlx::query_scalar(&count_sql)
        .bind(value)
        .fetch_one(db)
        .await?;

    Ok(Page {
        items,
        request: page,
        total_elements,
    })
}

pub async fn update(
    db: &PgPool,
    member_id: i64,
    changes: &MemberChanges,
) -> RepoResult<Option<MemberRow>> {
    // bg_color_id: Some(Some(v)) -> set to v
    // bg_color_id: Some(None)    -> set to NULL
    // bg_color_id: None          -> do not update
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        WITH m AS (
            UPDATE members
            SET
                name = COALESCE($2, name),
                password = COALESCE($3, password),
                mbti = COALESCE($4, mbti),
                interesting = COALESCE($5, interesting),
                bg_color_id = CASE WHEN $6 = false THEN bg_color_id ELSE $7 END,
                modified_at = now()
            WHERE member_id = $1
            RETURNING *
        )
        SELECT
            m.member_id, m.email, m.name, m.mbti, m.interesting,
            m.bg_color_id, c.color_name, c.hex_code,
            m.roles, m.created_at, m.modified_at
        FROM m
        LEFT JOIN bg_colors c ON c.bg_color_id = m.bg_color_id
        "#,
    )
    .bind(member_id)
    .bind(&changes.name)
    .bind(&changes.password_hash)
    .bind(&changes.mbti)
    .bind(&changes.interesting)
    .bind(changes.bg_color_id.is_some()) // $6: flag to set bg_color_id
    .bind(changes.bg_color_id.flatten()) // $7: new bg_color_id value
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, member_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM members
        WHERE member_id = $1
        "#,
    )
    .bind(member_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
