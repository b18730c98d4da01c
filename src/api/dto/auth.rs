use serde::Deserialize;

use crate::api::dto::{is_blank, validation_result};
use crate::error::{AppError, FieldError};

/// Login form. `username` is the member's email.
#[derive(Debug, Deserialize)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

impl LoginDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if is_blank(&self.username) {
            errors.push(FieldError::new("username", "must not be blank"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "must not be blank"));
        }
        validation_result(errors)
    }
}
