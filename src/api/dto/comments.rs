use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::{is_blank, validation_result};
use crate::error::{AppError, FieldError};

pub const MAX_CONTENT_LEN: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPostDto {
    /// The member whose guestbook receives the comment.
    pub owner_id: i64,
    pub content: String,
}

impl CommentPostDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.owner_id < 1 {
            errors.push(FieldError::new("ownerId", "must be positive"));
        }
        check_content(&self.content, &mut errors);
        validation_result(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentPatchDto {
    pub content: String,
}

impl CommentPatchDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_content(&self.content, &mut errors);
        validation_result(errors)
    }
}

fn check_content(content: &str, errors: &mut Vec<FieldError>) {
    if is_blank(content) {
        errors.push(FieldError::new("content", "must not be blank"));
    } else if content.chars().count() > MAX_CONTENT_LEN {
        errors.push(FieldError::new(
            "content",
            format!("must be at most {MAX_CONTENT_LEN} characters"),
        ));
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub owner_id: i64,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: i64,
    pub owner_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_must_be_present_and_short() {
        let ok = CommentPostDto {
            owner_id: 1,
            content: "hello".into(),
        };
        assert!(ok.validate().is_ok());

        let blank = CommentPatchDto { content: " ".into() };
        assert!(blank.validate().is_err());

        let long = CommentPatchDto {
            content: "a".repeat(MAX_CONTENT_LEN + 1),
        };
        assert!(long.validate().is_err());
    }
}
