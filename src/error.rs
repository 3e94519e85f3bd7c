//! WRP error types

use thiserror::Error;

use crate::message::MessageType;

/// Locator and device-identifier grammar errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed device identifier
    #[error("invalid device name {input:?}: {reason}")]
    InvalidDeviceName {
        /// Rejected input
        input: String,
        /// Grammar rule that failed
        reason: &'static str,
    },

    /// Malformed locator
    #[error("invalid locator {input:?}: {reason}")]
    InvalidLocator {
        /// Rejected input
        input: String,
        /// Structural invariant that failed
        reason: &'static str,
    },
}

/// WRP message, validation, and pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    /// Required field is missing or empty
    #[error("message is invalid: missing required field: {field}")]
    MissingField {
        /// Wire name of the missing field
        field: &'static str,
    },

    /// Field is not legal for the message type
    #[error("message is invalid: field not allowed here: {field}")]
    ForbiddenField {
        /// Wire name of the offending field
        field: &'static str,
    },

    /// Field does not parse as a locator
    #[error("message is invalid: {field} is not a valid locator")]
    InvalidLocatorField {
        /// Wire name of the offending field
        field: &'static str,
        /// Underlying grammar failure
        #[source]
        source: ParseError,
    },

    /// Message type does not match the conversion target
    #[error("message is invalid: expected {expected} message, found {found}")]
    UnexpectedMessageType {
        /// Conversion target
        expected: &'static str,
        /// Actual type carried by the envelope
        found: MessageType,
    },

    /// Quality-of-service value outside the 0-99 scale
    #[error("message is invalid: quality of service out of range: {value}")]
    QosOutOfRange {
        /// Rejected value
        value: i64,
    },

    /// No partner identifiers present
    #[error("message is invalid: no partner identifiers")]
    PartnerIdsMissing,

    /// Expected partner identifier not present
    #[error("message is invalid: partner identifiers do not include {want:?}")]
    PartnerIdNotListed {
        /// Identifier that must be listed
        want: String,
    },

    /// Locator grammar failure outside a specific message field
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Pipeline run observed a cancelled token
    #[error("operation cancelled")]
    Cancelled,

    /// No content-type maps to a known format
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType {
        /// Rejected content type
        content_type: String,
    },

    /// Msgpack encoding failure
    #[error("msgpack encode error: {0}")]
    EncodeMsgpack(#[from] rmp_serde::encode::Error),

    /// Msgpack decoding failure (includes invalid UTF-8 in string fields)
    #[error("msgpack decode error: {0}")]
    DecodeMsgpack(#[from] rmp_serde::decode::Error),

    /// JSON encoding or decoding failure
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
