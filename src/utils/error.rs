use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Placeable '{0}' not found")]
    UnknownPlaceable(String),

    #[error("Invalid quantity for '{name}': {value}")]
    InvalidQuantity { name: String, value: String },

    #[error("Invalid placeable name: {reason}")]
    InvalidPlaceableName { reason: String },

    #[error("Placeable '{0}' appears more than once in the request")]
    DuplicatePlaceable(String),

    #[error("No placeables selected")]
    EmptySelection,

    #[error("Resource total for '{resource}' exceeds the supported range")]
    AmountOverflow { resource: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Remote service returned {status}: {detail}")]
    RemoteError { status: u16, detail: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Catalog,
    Network,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Catalog => "catalog",
            ErrorCategory::Network => "network",
            ErrorCategory::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidQuantity { .. }
            | CalcError::InvalidPlaceableName { .. }
            | CalcError::DuplicatePlaceable(_)
            | CalcError::EmptySelection
            | CalcError::AmountOverflow { .. } => ErrorCategory::Validation,
            CalcError::UnknownPlaceable(_) => ErrorCategory::NotFound,
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CalcError::CatalogError { .. } => ErrorCategory::Catalog,
            CalcError::RemoteError { .. } | CalcError::HttpError(_) => ErrorCategory::Network,
            CalcError::CsvError(_) | CalcError::IoError(_) | CalcError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Catalog => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 呼叫端造成的錯誤 (對應 HTTP 4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::NotFound
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::UnknownPlaceable(name) => {
                format!("The placeable '{}' does not exist in the catalog.", name)
            }
            CalcError::InvalidQuantity { name, value } => format!(
                "The quantity for '{}' must be a whole number (got {}).",
                name, value
            ),
            CalcError::EmptySelection => "Please select at least one placeable item.".to_string(),
            CalcError::DuplicatePlaceable(name) => {
                format!("'{}' was selected more than once.", name)
            }
            CalcError::RemoteError { detail, .. } => {
                format!("The calculator service rejected the request: {}", detail)
            }
            CalcError::HttpError(_) => {
                "Failed to reach the calculator service. Make sure the server is running."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::UnknownPlaceable(_) => "List the available placeables and check the spelling",
            CalcError::InvalidQuantity { .. } => "Use a whole number such as 3",
            CalcError::InvalidPlaceableName { .. } => "Provide a non-empty placeable name",
            CalcError::DuplicatePlaceable(_) => "Combine the quantities into a single entry",
            CalcError::EmptySelection => "Select at least one placeable with a quantity above zero",
            CalcError::AmountOverflow { .. } => "Reduce the requested quantities",
            CalcError::CatalogError { .. } => "Check that the catalog file is a valid placeable list",
            CalcError::RemoteError { .. } => "Check the request and the server logs",
            CalcError::HttpError(_) => "Check the API URL and that the server is reachable",
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            CalcError::CsvError(_) | CalcError::IoError(_) | CalcError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
