//! Error types for the hazard monitor.
//!
//! Three upstream failure classes reach the application core, each with a
//! different consequence:
//!
//! | Error               | Raised by                     | Consequence                          |
//! |---------------------|-------------------------------|--------------------------------------|
//! | [`TransportError`]  | reading / history / log fetch | connectivity indicator, state kept   |
//! | [`RegistrationError`] | alert-log POST              | edge lost, diagnostic log only       |
//! | [`ActuatorError`]   | manual emergency / actuators  | operator notice, alarm state kept    |
//!
//! None of them is fatal.  [`ConfigError`] only appears at start-up.

use core::fmt;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// A read-side backend call (reading, history, alert log) failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout.
    Unreachable(String),
    /// The backend answered with a non-success HTTP status.
    Status(u16),
    /// The body could not be decoded into the expected shape.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(msg) => write!(f, "backend unreachable: {msg}"),
            Self::Status(code) => write!(f, "backend returned HTTP {code}"),
            Self::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

// ---------------------------------------------------------------------------
// Registration errors
// ---------------------------------------------------------------------------

/// The alert-log POST failed.  The edge that caused it is considered lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    Unreachable(String),
    Status(u16),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(msg) => write!(f, "alert log unreachable: {msg}"),
            Self::Status(code) => write!(f, "alert log returned HTTP {code}"),
        }
    }
}

impl std::error::Error for RegistrationError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

/// An operator-initiated command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    Unreachable(String),
    Status(u16),
    /// The backend processed the request and reported failure.
    Rejected(Option<String>),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(msg) => write!(f, "actuator backend unreachable: {msg}"),
            Self::Status(code) => write!(f, "actuator backend returned HTTP {code}"),
            Self::Rejected(Some(msg)) => write!(f, "rejected: {msg}"),
            Self::Rejected(None) => write!(f, "rejected by backend"),
        }
    }
}

impl std::error::Error for ActuatorError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying file I/O failed.
    IoError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
