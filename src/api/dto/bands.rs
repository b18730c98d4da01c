/*
 * Responsibility
 * - /bands request bodies and response
 * - grade range depends on the school level (elementary 1..=6, otherwise 1..=3)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::{is_blank, validation_result};
use crate::error::{AppError, FieldError};
use crate::repos::band_repo::{BandStatus, SchoolCode};

pub const MAX_BAN_NUMBER: i32 = 99;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPostDto {
    pub school: String,
    pub school_code: SchoolCode,
    pub grade: i32,
    pub ban_number: i32,
    pub username: String,
    pub join_pass: String,
}

impl BandPostDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if is_blank(&self.school) {
            errors.push(FieldError::new("school", "must not be blank"));
        }
        if let Err(e) = validate_grade(self.school_code, self.grade) {
            errors.push(e);
        }
        if let Err(e) = validate_ban_number(self.ban_number) {
            errors.push(e);
        }
        if is_blank(&self.username) {
            errors.push(FieldError::new("username", "must not be blank"));
        }
        if is_blank(&self.join_pass) {
            errors.push(FieldError::new("joinPass", "must not be blank"));
        }
        validation_result(errors)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPatchDto {
    pub school: Option<String>,
    pub school_code: Option<SchoolCode>,
    pub grade: Option<i32>,
    pub ban_number: Option<i32>,
    pub join_pass: Option<String>,
    pub status_update: Option<BandStatus>,
}

impl BandPatchDto {
    /// `current` is the stored school level; grade is checked against the level
    /// the band will have after the patch.
    pub fn validate(&self, current: SchoolCode, current_grade: i32) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(school) = &self.school
            && is_blank(school)
        {
            errors.push(FieldError::new("school", "must not be blank"));
        }
        if self.grade.is_some() || self.school_code.is_some() {
            let level = self.school_code.unwrap_or(current);
            let grade = self.grade.unwrap_or(current_grade);
            if let Err(e) = validate_grade(level, grade) {
                errors.push(e);
            }
        }
        if let Some(ban_number) = self.ban_number
            && let Err(e) = validate_ban_number(ban_number)
        {
            errors.push(e);
        }
        if let Some(join_pass) = &self.join_pass
            && is_blank(join_pass)
        {
            errors.push(FieldError::new("joinPass", "must not be blank"));
        }
        validation_result(errors)
    }
}

pub fn validate_grade(level: SchoolCode, grade: i32) -> Result<(), FieldError> {
    let max = level.max_grade();
    if (1..=max).contains(&grade) {
        Ok(())
    } else {
        Err(FieldError::new(
            "grade",
            format!("must be between 1 and {max} for {}", level.as_str()),
        ))
    }
}

pub fn validate_ban_number(ban_number: i32) -> Result<(), FieldError> {
    if (1..=MAX_BAN_NUMBER).contains(&ban_number) {
        Ok(())
    } else {
        Err(FieldError::new(
            "banNumber",
            format!("must be between 1 and {MAX_BAN_NUMBER}"),
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandResponse {
    pub band_id: i64,
    pub school: String,
    pub school_code: SchoolCode,
    pub grade: i32,
    pub ban_number: i32,
    pub username: String,
    pub status: String,
    pub member_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
