use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressBookError {
    #[error("Contact '{first_name} {last_name}' already exists")]
    DuplicateContact {
        first_name: String,
        last_name: String,
    },

    #[error("Contact '{first_name} {last_name}' not found")]
    ContactNotFound {
        first_name: String,
        last_name: String,
    },

    #[error("Address book '{name}' already exists")]
    AddressBookAlreadyExists { name: String },

    #[error("Address book '{name}' not found")]
    AddressBookNotFound { name: String },

    #[error("Address book '{name}' has no contacts")]
    EmptyAddressBook { name: String },

    #[error("Invalid {field} '{value}': {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported storage format: {value}")]
    UnsupportedFormat { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AddressBookError {
    /// 給使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DuplicateContact {
                first_name,
                last_name,
            } => format!(
                "A contact named {} {} is already in this address book.",
                first_name, last_name
            ),
            Self::ContactNotFound {
                first_name,
                last_name,
            } => format!("No contact named {} {} was found.", first_name, last_name),
            Self::AddressBookAlreadyExists { name } => {
                format!("An address book named '{}' already exists.", name)
            }
            Self::AddressBookNotFound { name } => {
                format!("There is no address book named '{}'.", name)
            }
            Self::EmptyAddressBook { name } => {
                format!("Address book '{}' has no contacts to display.", name)
            }
            Self::ValidationError { field, reason, .. } => {
                format!("The {} you entered is not valid: {}.", field, reason)
            }
            Self::UnsupportedFormat { value } => {
                format!("'{}' is not a supported file format.", value)
            }
            Self::IoError(e) => format!("Could not access the file: {}", e),
            Self::CsvError(e) => format!("Could not read or write the CSV file: {}", e),
            Self::SerializationError(e) => format!("Could not read or write the JSON file: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DuplicateContact { .. } => "Use a different first or last name, or edit the existing contact",
            Self::ContactNotFound { .. } => "Check the spelling of the first and last name",
            Self::AddressBookAlreadyExists { .. } => "Choose another name or open the existing book",
            Self::AddressBookNotFound { .. } => "Create the address book first or list the available books",
            Self::EmptyAddressBook { .. } => "Add a contact or load the book from a file",
            Self::ValidationError { .. } => "Re-enter the value in the expected format",
            Self::UnsupportedFormat { .. } => "Use one of: txt, csv, json",
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Inspect the stored file; it may have been edited by hand"
            }
            Self::ConfigError { .. } => "Fix the configuration file or command-line flags",
        }
    }

    /// 配置錯誤與輸入結束無法在互動中恢復，其餘皆可
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigError { .. } => false,
            Self::IoError(e) => e.kind() != std::io::ErrorKind::UnexpectedEof,
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressBookError>;
