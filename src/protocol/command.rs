//! Request definitions
//!
//! Represents requests sent by clients to the store.

use serde::{Deserialize, Serialize};

/// Request types (frame tag values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestType {
    CreateKeyspace = 0x01,
    ReadColumn = 0x02,
    MultiRead = 0x03,
    Mutate = 0x04,
    Ping = 0x05,
}

impl RequestType {
    /// Parse a frame tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(RequestType::CreateKeyspace),
            0x02 => Some(RequestType::ReadColumn),
            0x03 => Some(RequestType::MultiRead),
            0x04 => Some(RequestType::Mutate),
            0x05 => Some(RequestType::Ping),
            _ => None,
        }
    }
}

/// Row comparator of a table, fixes the ordering of row keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Lexicographic byte order
    Bytes,
    /// UTF-8 order (byte order over valid UTF-8)
    Utf8,
}

/// Definition of a table (column family) inside a keyspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name
    pub name: String,

    /// Row key comparator
    pub comparator: Comparator,
}

impl TableDef {
    /// Byte-ordered table with the given name
    pub fn bytes_ordered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comparator: Comparator::Bytes,
        }
    }
}

/// A single logical write inside a mutation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Write a column value, stamped with the mutation clock
    Insert {
        table: String,
        key: Vec<u8>,
        column: String,
        value: Vec<u8>,
        timestamp: i64,
    },

    /// Remove a column
    Delete {
        table: String,
        key: Vec<u8>,
        column: String,
    },
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Provision a keyspace and its tables (get-or-create)
    CreateKeyspace {
        keyspace: String,
        replication_factor: u32,
        tables: Vec<TableDef>,
    },

    /// Point read of one column under one key
    ReadColumn {
        keyspace: String,
        table: String,
        column: String,
        key: Vec<u8>,
    },

    /// Batched read of one column under many keys
    MultiRead {
        keyspace: String,
        table: String,
        column: String,
        keys: Vec<Vec<u8>>,
    },

    /// Batched mutations, applied by the store as one unit
    Mutate {
        keyspace: String,
        mutations: Vec<Mutation>,
    },

    /// Ping (health check)
    Ping,
}

impl Request {
    /// Get the request type (frame tag)
    pub fn request_type(&self) -> RequestType {
        match self {
            Request::CreateKeyspace { .. } => RequestType::CreateKeyspace,
            Request::ReadColumn { .. } => RequestType::ReadColumn,
            Request::MultiRead { .. } => RequestType::MultiRead,
            Request::Mutate { .. } => RequestType::Mutate,
            Request::Ping => RequestType::Ping,
        }
    }
}
