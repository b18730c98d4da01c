/*
 * Responsibility
 * - request / response bodies (camelCase on the wire)
 * - shape validation via validate(); ownership and existence checks stay in handlers
 */
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, FieldError};
use crate::repos::page::PageRequest;

pub mod auth;
pub mod bands;
pub mod colors;
pub mod comments;
pub mod members;
pub mod mentions;
pub mod page;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Keeps `null` apart from a missing field:
/// - missing: None (via `#[serde(default)]`)
/// - null: Some(None)
/// - value: Some(Some(v))
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Absent values fall back to page 1 / size 10.
pub fn page_request(page: Option<i64>, size: Option<i64>) -> Result<PageRequest, Vec<FieldError>> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

    let mut errors = Vec::new();
    if page < 1 || page > i64::from(u32::MAX) {
        errors.push(FieldError::new("page", "must be positive"));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        errors.push(FieldError::new("size", format!("must be between 1 and {MAX_PAGE_SIZE}")));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PageRequest {
        page: page as u32,
        size: size as u32,
    })
}

pub(crate) fn validation_result(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Deliberately loose: one `@`, non-empty local part, dotted domain, no whitespace.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Four letters, one from each MBTI axis (E/I, S/N, T/F, J/P). Case-insensitive.
pub(crate) fn is_valid_mbti(value: &str) -> bool {
    const AXES: [[char; 2]; 4] = [['E', 'I'], ['S', 'N'], ['T', 'F'], ['J', 'P']];

    let letters: Vec<char> = value.chars().map(|c| c.to_ascii_uppercase()).collect();
    letters.len() == AXES.len() && letters.iter().zip(AXES).all(|(c, axis)| axis.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_bounds() {
        assert_eq!(page_request(None, None).unwrap(), PageRequest { page: 1, size: 10 });
        assert_eq!(
            page_request(Some(3), Some(100)).unwrap(),
            PageRequest { page: 3, size: 100 }
        );

        let errors = page_request(Some(0), Some(101)).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["page", "size"]);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("hgd@band.io"));
        assert!(!is_valid_email("hgd.band.io"));
        assert!(!is_valid_email("@band.io"));
        assert!(!is_valid_email("hgd@band"));
        assert!(!is_valid_email("h gd@band.io"));
        assert!(!is_valid_email("a@b@band.io"));
    }

    #[test]
    fn mbti_shape() {
        assert!(is_valid_mbti("INFP"));
        assert!(is_valid_mbti("estj"));
        assert!(!is_valid_mbti("INF"));
        assert!(!is_valid_mbti("IXFP"));
        assert!(!is_valid_mbti("NIFP"));
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        color: Option<Option<i64>>,
    }

    #[test]
    fn double_option_keeps_null_apart_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"color":null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"color":3}"#).unwrap();

        assert_eq!(missing.color, None);
        assert_eq!(null.color, Some(None));
        assert_eq!(set.color, Some(Some(3)));
    }
}
