//! Client-side form validation.
//!
//! These checks only exist to give fast feedback; the backend re-validates
//! everything. Each form collects its problems into [`FieldErrors`] and only
//! produces a request payload when the map is empty.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::future::Future;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+34|0034)?[6789]\d{8}$").expect("phone regex"));

static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:0[1-9]|[1-4]\d|5[0-2])\d{3}$").expect("postal code regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email regex"));

static TAX_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]\d{7}[A-Z0-9]$").expect("tax id regex"));

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Spanish phone number: optional `+34`/`0034`, then 9 digits starting 6-9.
/// Spaces, dots and dashes are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .collect();
    PHONE_RE.is_match(&compact)
}

/// Spanish postal code: 5 digits with a province prefix 01..=52.
pub fn is_valid_postal_code(value: &str) -> bool {
    POSTAL_CODE_RE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Person or company name: 3..=100 characters once trimmed.
pub fn is_valid_name(value: &str) -> bool {
    let len = value.trim().chars().count();
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len)
}

/// NIF/CIF/NIE shape check (no checksum letter verification).
pub fn is_valid_tax_id(value: &str) -> bool {
    TAX_ID_RE.is_match(&normalize_tax_id(value))
}

pub fn normalize_tax_id(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Trim and turn an empty string into `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an optional decimal typed by the user. Accepts a comma as the
/// decimal separator. `Ok(None)` for blank input.
pub fn parse_optional_decimal(value: &str) -> Result<Option<f64>, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ())
}

/// Parse an optional whole number. `Ok(None)` for blank input.
pub fn parse_optional_int(value: &str) -> Result<Option<i64>, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| ())
}

/// Field name → message, ordered by field name for stable rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Banner text shown above a form that failed validation.
pub const GENERAL_VALIDATION_MESSAGE: &str = "Revisa los campos marcados antes de guardar.";

/// Outcome of a form submission that did not succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError<E> {
    /// Client-side validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The request was sent and failed.
    Rejected(E),
}

/// Send `validated` through `send` only when validation passed.
pub async fn submit_validated<P, T, E, F, Fut>(
    validated: Result<P, FieldErrors>,
    send: F,
) -> Result<T, SubmitError<E>>
where
    F: FnOnce(P) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let payload = validated.map_err(SubmitError::Invalid)?;
    send(payload).await.map_err(SubmitError::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("622334455"));
        assert!(is_valid_phone("+34 622 33 44 55"));
        assert!(is_valid_phone("980-123-456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("522334455"));
        assert!(!is_valid_phone("6223344556"));
    }

    #[test]
    fn test_postal_code() {
        assert!(is_valid_postal_code("49000"));
        assert!(is_valid_postal_code("01001"));
        assert!(!is_valid_postal_code("4900"));
        assert!(!is_valid_postal_code("53000"));
        assert!(!is_valid_postal_code("00123"));
        assert!(!is_valid_postal_code("49A00"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email(" bodega@vino.es "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn test_name() {
        assert!(!is_valid_name("Bo"));
        assert!(!is_valid_name("   Bo   "));
        assert!(is_valid_name("Bodega X"));
        assert!(!is_valid_name(&"x".repeat(101)));
    }

    #[test]
    fn test_tax_id() {
        assert!(is_valid_tax_id("B49123456"));
        assert!(is_valid_tax_id("12345678z"));
        assert!(is_valid_tax_id("x-1234567-l"));
        assert!(!is_valid_tax_id("1234"));
    }

    #[test]
    fn test_non_empty_and_numbers() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" Toro "), Some("Toro".to_string()));
        assert_eq!(parse_optional_decimal("12,5"), Ok(Some(12.5)));
        assert_eq!(parse_optional_decimal(""), Ok(None));
        assert!(parse_optional_decimal("abc").is_err());
        assert_eq!(parse_optional_int(" 42 "), Ok(Some(42)));
        assert!(parse_optional_int("4.2").is_err());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("nombre", "primero");
        errors.add("nombre", "segundo");
        assert_eq!(errors.get("nombre"), Some("primero"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result(()).is_err());
    }
}
