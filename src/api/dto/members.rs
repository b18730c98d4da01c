/*
 * Responsibility
 * - /users request bodies, list query and response
 * - bgColorId on patch is tri-state (missing / null / value)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::{
    colors::ColorResponse, double_option, is_blank, is_valid_email, is_valid_mbti,
    validation_result,
};
use crate::error::{AppError, FieldError};

pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_NAME_LEN: usize = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPostDto {
    pub email: String,
    pub password: String,
    pub name: String,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    pub bg_color_id: Option<i64>,
}

impl MemberPostDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "must be a well-formed email address"));
        }
        check_password(&self.password, &mut errors);
        check_name(&self.name, &mut errors);
        if let Some(mbti) = &self.mbti {
            check_mbti(mbti, &mut errors);
        }
        if let Some(interesting) = &self.interesting
            && is_blank(interesting)
        {
            errors.push(FieldError::new("interesting", "must not be blank"));
        }
        if let Some(id) = self.bg_color_id
            && id < 1
        {
            errors.push(FieldError::new("bgColorId", "must be positive"));
        }
        validation_result(errors)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatchDto {
    pub name: Option<String>,
    pub password: Option<String>,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub bg_color_id: Option<Option<i64>>,
}

impl MemberPatchDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut errors);
        }
        if let Some(mbti) = &self.mbti {
            check_mbti(mbti, &mut errors);
        }
        if let Some(interesting) = &self.interesting
            && is_blank(interesting)
        {
            errors.push(FieldError::new("interesting", "must not be blank"));
        }
        if let Some(Some(id)) = self.bg_color_id
            && id < 1
        {
            errors.push(FieldError::new("bgColorId", "must be positive"));
        }
        validation_result(errors)
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if is_blank(name) {
        errors.push(FieldError::new("name", "must not be blank"));
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
}

fn check_mbti(mbti: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_mbti(mbti) {
        errors.push(FieldError::new("mbti", "must be a four-letter MBTI type"));
    }
}

/// `GET /users` query. With neither filter the current member is returned.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    pub mbtitype: Option<String>,
    pub interestingtype: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member_id: i64,
    pub email: String,
    pub name: String,
    pub mbti: Option<String>,
    pub interesting: Option<String>,
    pub bg_color: Option<ColorResponse>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: serde_json::Value) -> MemberPostDto {
        serde_json::from_value(json).unwrap()
    }

    fn fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => errors.iter().map(|e| e.field).collect(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sign_up_accepts_minimal_body() {
        let dto = post(serde_json::json!({
            "email": "hgd@band.io",
            "password": "pass1234",
            "name": "Hong"
        }));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn sign_up_reports_every_bad_field() {
        let dto = post(serde_json::json!({
            "email": "not-an-email",
            "password": "pw",
            "name": "  ",
            "mbti": "XXXX",
            "bgColorId": 0
        }));
        assert_eq!(
            fields(dto.validate().unwrap_err()),
            vec!["email", "password", "name", "mbti", "bgColorId"]
        );
    }

    #[test]
    fn patch_fields_are_optional() {
        let dto: MemberPatchDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.bg_color_id, None);

        let dto: MemberPatchDto = serde_json::from_str(r#"{"bgColorId":null,"name":""}"#).unwrap();
        assert_eq!(dto.bg_color_id, Some(None));
        assert_eq!(fields(dto.validate().unwrap_err()), vec!["name"]);
    }
}
