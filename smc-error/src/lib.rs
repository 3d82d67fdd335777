//! Unified error handling for smcstat
//!
//! This crate provides the single error type used by the decoders, the
//! aggregator and the hardware backends. It uses thiserror for the Display
//! and Error trait impls.

use std::io;
use std::path::PathBuf;

/// Result type alias using SmcError
pub type Result<T> = std::result::Result<T, SmcError>;

/// Unified error type for all smcstat operations
#[derive(thiserror::Error, Debug)]
pub enum SmcError {
    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Unknown SMC type code {code:?}")]
    UnknownTypeCode {
        code: String,
    },

    #[error("Invalid sample length for type {type_code:?}: expected {expected}, got {actual}")]
    InvalidSampleLength {
        type_code: String,
        expected: String,
        actual: usize,
    },

    #[error("Unit count {count} from key {key:?} exceeds the limit of {max}")]
    UnitCountOutOfRange {
        key: String,
        count: u32,
        max: u32,
    },

    #[error("Invalid type code {0:?} (must be exactly 4 ASCII characters)")]
    InvalidTypeCode(String),

    // ============================================================================
    // Hardware Access Errors
    // ============================================================================
    #[error("Failed to read SMC key {key:?}; code {code:#x}")]
    HardwareQueryFailed {
        key: String,
        code: u32,
    },

    #[error("Unable to open {service}; code {code:#x}")]
    HandleOpen {
        service: String,
        code: u32,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Generic(String),
}

impl SmcError {
    /// Create a generic error from a string
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create an unknown type code error
    pub fn unknown_type(code: impl Into<String>) -> Self {
        Self::UnknownTypeCode { code: code.into() }
    }

    /// Create a sample length error
    pub fn invalid_length(type_code: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        Self::InvalidSampleLength {
            type_code: type_code.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a unit count error
    pub fn unit_count(key: impl Into<String>, count: u32, max: u32) -> Self {
        Self::UnitCountOutOfRange {
            key: key.into(),
            count,
            max,
        }
    }

    /// Create a hardware query error carrying the collaborator's status code
    pub fn query_failed(key: impl Into<String>, code: u32) -> Self {
        Self::HardwareQueryFailed {
            key: key.into(),
            code,
        }
    }

    /// Create a handle open error
    pub fn handle_open(service: impl Into<String>, code: u32) -> Self {
        Self::HandleOpen {
            service: service.into(),
            code,
        }
    }

    /// Create an invalid config error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised while interpreting sample bytes
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeCode { .. }
                | Self::InvalidSampleLength { .. }
                | Self::UnitCountOutOfRange { .. }
        )
    }
}

// Allow converting from String to SmcError
impl From<String> for SmcError {
    fn from(s: String) -> Self {
        Self::Generic(s)
    }
}

// Allow converting from &str to SmcError
impl From<&str> for SmcError {
    fn from(s: &str) -> Self {
        Self::Generic(s.to_string())
    }
}
