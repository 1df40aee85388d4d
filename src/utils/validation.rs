use crate::utils::error::{AddressBookError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{3,}$").unwrap());
static ZIP_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+@\w+\.\w+$").unwrap());

/// Format rule applied to a single contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// First or last name: letters only, at least three of them.
    Name,
    ZipCode,
    PhoneNumber,
    Email,
    /// Address, city and state: anything that is not blank.
    NonEmpty,
    /// Address book name. It becomes a file name inside the data directory,
    /// so separators and dot-only names are refused.
    BookName,
}

impl FieldRule {
    pub fn reason(&self) -> &'static str {
        match self {
            FieldRule::Name => "must contain at least 3 letters and nothing else",
            FieldRule::ZipCode => "must be exactly 6 digits",
            FieldRule::PhoneNumber => "must be exactly 10 digits",
            FieldRule::Email => "must look like name@domain.tld",
            FieldRule::NonEmpty => "cannot be empty",
            FieldRule::BookName => "cannot be empty, '.' or '..', or contain '/' or '\\'",
        }
    }
}

pub fn validate(value: &str, rule: FieldRule) -> bool {
    match rule {
        FieldRule::Name => NAME_RE.is_match(value),
        FieldRule::ZipCode => ZIP_CODE_RE.is_match(value),
        FieldRule::PhoneNumber => PHONE_NUMBER_RE.is_match(value),
        FieldRule::Email => EMAIL_RE.is_match(value),
        FieldRule::NonEmpty => !value.trim().is_empty(),
        FieldRule::BookName => is_plain_file_stem(value),
    }
}

fn is_plain_file_stem(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !value.contains(['/', '\\', '\0'])
}

pub fn validate_field(field_name: &str, value: &str, rule: FieldRule) -> Result<()> {
    if validate(value, rule) {
        return Ok(());
    }
    Err(AddressBookError::ValidationError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: rule.reason().to_string(),
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AddressBookError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AddressBookError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
