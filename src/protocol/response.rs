//! Response definitions
//!
//! Represents responses sent by the store to clients.

use crate::error::{Result, StorageError};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    Error = 0x02,
}

impl Status {
    /// Parse a frame tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::NotFound),
            0x02 => Some(Status::Error),
            _ => None,
        }
    }
}

/// A response to send to a client
///
/// The payload meaning depends on the request: a column value for
/// READ_COLUMN, an encoded row list for MULTI_READ, an error message for
/// ERROR, nothing for mutations and provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create an OK response carrying an encoded row list
    pub fn rows(rows: &[(Vec<u8>, Vec<u8>)]) -> Result<Self> {
        Ok(Self {
            status: Status::Ok,
            payload: Some(encode_rows(rows)?),
        })
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: None,
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Error message carried by an ERROR response, if any
    pub fn error_message(&self) -> String {
        self.payload
            .as_deref()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .unwrap_or_else(|| "unspecified store error".to_string())
    }
}

// =============================================================================
// Row List Payload
// =============================================================================

/// Encode a MULTI_READ row list (encoded key, value bytes) as a payload
pub fn encode_rows(rows: &[(Vec<u8>, Vec<u8>)]) -> Result<Vec<u8>> {
    bincode::serialize(rows).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a MULTI_READ payload back into a row list
pub fn decode_rows(payload: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
    bincode::deserialize(payload).map_err(|e| StorageError::Serialization(e.to_string()))
}
