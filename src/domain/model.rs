use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::{validate_field, FieldRule, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field order used by every storage format.
pub const CONTACT_FIELDS: [&str; 8] = [
    "first_name",
    "last_name",
    "address",
    "city",
    "state",
    "zip_code",
    "phone_number",
    "email",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub email: String,
}

impl Contact {
    /// Fields are expected to have been checked already; see [`Validate`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Builds a contact from a stored record. Returns `None` unless exactly eight fields are given.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = fields.into_iter().map(Into::into);
        let contact = Self {
            first_name: it.next()?,
            last_name: it.next()?,
            address: it.next()?,
            city: it.next()?,
            state: it.next()?,
            zip_code: it.next()?,
            phone_number: it.next()?,
            email: it.next()?,
        };
        if it.next().is_some() {
            return None;
        }
        Some(contact)
    }

    pub fn fields(&self) -> [&str; 8] {
        [
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.phone_number,
            &self.email,
        ]
    }

    /// Case-insensitive identity check on (first_name, last_name).
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name.to_lowercase() == first_name.to_lowercase()
            && self.last_name.to_lowercase() == last_name.to_lowercase()
    }

    /// True when either city or state equals `location`, ignoring case.
    pub fn is_located_in(&self, location: &str) -> bool {
        let location = location.to_lowercase();
        self.city.to_lowercase() == location || self.state.to_lowercase() == location
    }

    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Overwrites only the fields present in `changes`.
    pub fn update(&mut self, changes: ContactUpdate) {
        let ContactUpdate {
            first_name,
            last_name,
            address,
            city,
            state,
            zip_code,
            phone_number,
            email,
        } = changes;

        let targets = [
            (first_name, &mut self.first_name),
            (last_name, &mut self.last_name),
            (address, &mut self.address),
            (city, &mut self.city),
            (state, &mut self.state),
            (zip_code, &mut self.zip_code),
            (phone_number, &mut self.phone_number),
            (email, &mut self.email),
        ];
        for (value, slot) in targets {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {} {}", self.first_name, self.last_name)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "State: {}", self.state)?;
        writeln!(f, "Zip Code: {}", self.zip_code)?;
        writeln!(f, "Phone Number: {}", self.phone_number)?;
        write!(f, "Email: {}", self.email)
    }
}

impl Validate for Contact {
    fn validate(&self) -> Result<()> {
        validate_field("first_name", &self.first_name, FieldRule::Name)?;
        validate_field("last_name", &self.last_name, FieldRule::Name)?;
        validate_field("address", &self.address, FieldRule::NonEmpty)?;
        validate_field("city", &self.city, FieldRule::NonEmpty)?;
        validate_field("state", &self.state, FieldRule::NonEmpty)?;
        validate_field("zip_code", &self.zip_code, FieldRule::ZipCode)?;
        validate_field("phone_number", &self.phone_number, FieldRule::PhoneNumber)?;
        validate_field("email", &self.email, FieldRule::Email)?;
        Ok(())
    }
}

/// Partial update for [`Contact::update`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Name the contact will carry once the update is applied.
    pub fn resulting_name<'a>(&'a self, current: &'a Contact) -> (&'a str, &'a str) {
        (
            self.first_name.as_deref().unwrap_or(&current.first_name),
            self.last_name.as_deref().unwrap_or(&current.last_name),
        )
    }
}

impl Validate for ContactUpdate {
    fn validate(&self) -> Result<()> {
        let checks = [
            ("first_name", &self.first_name, FieldRule::Name),
            ("last_name", &self.last_name, FieldRule::Name),
            ("address", &self.address, FieldRule::NonEmpty),
            ("city", &self.city, FieldRule::NonEmpty),
            ("state", &self.state, FieldRule::NonEmpty),
            ("zip_code", &self.zip_code, FieldRule::ZipCode),
            ("phone_number", &self.phone_number, FieldRule::PhoneNumber),
            ("email", &self.email, FieldRule::Email),
        ];
        for (field, value, rule) in checks {
            if let Some(value) = value {
                validate_field(field, value, rule)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Name,
    City,
}

impl FromStr for SortKey {
    type Err = AddressBookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "name" => Ok(SortKey::Name),
            "city" => Ok(SortKey::City),
            _ => Err(AddressBookError::ValidationError {
                field: "sort_key".to_string(),
                value: s.to_string(),
                reason: "expected none, name or city".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    Txt,
    Csv,
    Json,
}

impl StorageFormat {
    pub const ALL: [StorageFormat; 3] = [StorageFormat::Txt, StorageFormat::Csv, StorageFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Txt => "txt",
            StorageFormat::Csv => "csv",
            StorageFormat::Json => "json",
        }
    }

    /// `<book_name>.<ext>`
    pub fn file_name(&self, book_name: &str) -> String {
        format!("{}.{}", book_name, self.extension())
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for StorageFormat {
    type Err = AddressBookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(StorageFormat::Txt),
            "csv" => Ok(StorageFormat::Csv),
            "json" => Ok(StorageFormat::Json),
            _ => Err(AddressBookError::UnsupportedFormat {
                value: s.to_string(),
            }),
        }
    }
}
