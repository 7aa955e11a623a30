//! # PillarKV
//!
//! A minimal sparse column store client and reference server:
//! - Single and batch key-value operations over a fixed table/column
//! - Pluggable key serializers, UTF-8 string values
//! - Framed binary TCP protocol with CRC-checked bodies
//! - In-memory reference store for the demo and tests
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     KeyValueFacade                           │
//! │        insert / get / get_multi / insert_multi / delete      │
//! └─────────────────────┬────────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼────────────────────────────────────────┐
//! │                  Keyspace Handle                             │
//! │          (one guarded connection, clock source)              │
//! └─────────────────────┬────────────────────────────────────────┘
//!                       │  framed requests
//!                       ▼
//!               ═══════ TCP ═══════
//!                       │
//! ┌─────────────────────▼────────────────────────────────────────┐
//! │                    TCP Server                                │
//! │            (acceptor + session workers)                      │
//! └─────────────────────┬────────────────────────────────────────┘
//!                       │
//!               ┌───────▼───────┐
//!               │  ColumnStore  │
//!               │  (RwLock map) │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod serializer;
pub mod protocol;
pub mod client;
pub mod facade;
pub mod store;
pub mod server;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StorageError};
pub use config::Config;
pub use client::{Cluster, Keyspace};
pub use facade::KeyValueFacade;
pub use serializer::{BytesSerializer, KeySerializer, StringSerializer, U64Serializer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of PillarKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
