/*
 * Responsibility
 * - bands table CRUD
 * - school level / status enums (stored as their SCREAMING_SNAKE names)
 * - creator FK (member_id, ON DELETE CASCADE)
 */
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::page::{Page, PageRequest};

#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolCode {
    Elementary,
    Middle,
    High,
}

impl SchoolCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolCode::Elementary => "ELEMENTARY",
            SchoolCode::Middle => "MIDDLE",
            SchoolCode::High => "HIGH",
        }
    }

    /// Elementary schools run six grades, middle and high schools three.
    pub fn max_grade(&self) -> i32 {
        match self {
            SchoolCode::Elementary => 6,
            SchoolCode::Middle | SchoolCode::High => 3,
        }
    }
}

impl TryFrom<String> for SchoolCode {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "ELEMENTARY" => Ok(SchoolCode::Elementary),
            "MIDDLE" => Ok(SchoolCode::Middle),
            "HIGH" => Ok(SchoolCode::High),
            _ => Err(UnknownVariant {
                kind: "school code",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandStatus {
    BandActive,
    BandInactive,
    BandClosed,
}

impl BandStatus {
    pub fn name(&self) -> &'static str {
        match self {
            BandStatus::BandActive => "BAND_ACTIVE",
            BandStatus::BandInactive => "BAND_INACTIVE",
            BandStatus::BandClosed => "BAND_CLOSED",
        }
    }
}

impl fmt::Display for BandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for BandStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "BAND_ACTIVE" => Ok(BandStatus::BandActive),
            "BAND_INACTIVE" => Ok(BandStatus::BandInactive),
            "BAND_CLOSED" => Ok(BandStatus::BandClosed),
            _ => Err(UnknownVariant {
                kind: "band status",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BandRow {
    pub band_id: i64,
    pub school: String,
    #[sqlx(try_from = "String")]
    pub school_code: SchoolCode,
    pub grade: i32,
    pub ban_number: i32,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub status: BandStatus,
    pub member_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBand {
    pub school: String,
    pub school_code: SchoolCode,
    pub grade: i32,
    pub ban_number: i32,
    pub username: String,
    pub join_pass_hash: String,
    pub status: BandStatus,
    pub member_id: i64,
}

/// Partial update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandChanges {
    pub school: Option<String>,
    pub school_code: Option<SchoolCode>,
    pub grade: Option<i32>,
    pub ban_number: Option<i32>,
    pub join_pass_hash: Option<String>,
    pub status: Option<BandStatus>,
}

const BAND_COLUMNS: &str = r#"
    band_id, school, school_code, grade, ban_number, username,
    status, member_id, created_at, modified_at
"#;

pub async fn create(db: &PgPool, band: &NewBand) -> RepoResult<BandRow> {
    let sql = format!(
        r#"
        INSERT INTO bands (school, school_code, grade, ban_number, username, join_pass, status, member_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {BAND_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, BandRow>(&sql)
        .bind(&band.school)
        .bind(band.school_code.as_str())
        .bind(band.grade)
        .bind(band.ban_number)
        .bind(&band.username)
        .bind(&band.join_pass_hash)
        .bind(band.status.name())
        .bind(band.member_id)
        .fetch_one(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, band_id: i64) -> RepoResult<Option<BandRow>> {
    let sql = format!("SELECT {BAND_COLUMNS} FROM bands WHERE band_id = $1");
    let row = sqlx::query_as::<_, BandRow>(&sql)
        .bind(band_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn list(db: &PgPool, page: PageRequest) -> RepoResult<Page<BandRow>> {
    let sql = format!("SELECT {BAND_COLUMNS} FROM bands ORDER BY band_id DESC LIMIT $1 OFFSET $2");
    let items = sqlx::query_as::<_, BandRow>(&sql)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(db)
        .await?;

    let total_elements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bands")
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
    band_id: i64,
    changes: &BandChanges,
) -> RepoResult<Option<BandRow>> {
    let sql = format!(
        r#"
        UPDATE bands
        SET
            school = COALESCE($2, school),
            school_code = COALESCE($3, school_code),
            grade = COALESCE($4, grade),
            ban_number = COALESCE($5, ban_number),
            join_pass = COALESCE($6, join_pass),
            status = COALESCE($7, status),
            modified_at = now()
        WHERE band_id = $1
        RETURNING {BAND_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, BandRow>(&sql)
        .bind(band_id)
        .bind(&changes.school)
        .bind(changes.school_code.map(|c| c.as_str()))
        .bind(changes.grade)
        .bind(changes.ban_number)
        .bind(&changes.join_pass_hash)
        .bind(changes.status.map(|s| s.name()))
        .fetch_optional(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, band_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bands
        WHERE band_id = $1
        "#,
    )
    .bind(band_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_names_parse_back() {
        for status in [
            BandStatus::BandActive,
            BandStatus::BandInactive,
            BandStatus::BandClosed,
        ] {
            assert_eq!(BandStatus::try_from(status.name().to_string()).unwrap(), status);
        }
        assert!(BandStatus::try_from("ACTIVE".to_string()).is_err());
        assert!(SchoolCode::try_from("UNIVERSITY".to_string()).is_err());
    }

    #[test]
    fn serde_names_match_stored_names() {
        assert_eq!(
            serde_json::to_value(BandStatus::BandClosed).unwrap(),
            serde_json::json!("BAND_CLOSED")
        );
        assert_eq!(
            serde_json::from_value::<SchoolCode>(serde_json::json!("ELEMENTARY")).unwrap(),
            SchoolCode::Elementary
        );
    }

    #[test]
    fn grade_limit_depends_on_school_level() {
        assert_eq!(SchoolCode::Elementary.max_grade(), 6);
        assert_eq!(SchoolCode::Middle.max_grade(), 3);
        assert_eq!(SchoolCode::High.max_grade(), 3);
    }
}
