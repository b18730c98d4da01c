use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::validation_result;
use crate::error::{AppError, FieldError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionPostDto {
    pub comment_id: i64,
    /// The mentioned member.
    pub member_id: i64,
}

impl MentionPostDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.comment_id < 1 {
            errors.push(FieldError::new("commentId", "must be positive"));
        }
        if self.member_id < 1 {
            errors.push(FieldError::new("memberId", "must be positive"));
        }
        validation_result(errors)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionListQuery {
    pub member_id: i64,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionResponse {
    pub mention_id: i64,
    pub comment_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub created_at: DateTime<Utc>,
}
