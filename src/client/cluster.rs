//! Cluster Connector
//!
//! Entry point of the client: connects to a store address, provisions
//! keyspaces, and hands out keyspace handles.

use crate::config::Config;
use crate::error::{Result, StorageError};
use crate::protocol::{Request, Response, Status, TableDef};

use super::{Connection, Keyspace};

/// Definition used to provision a keyspace
#[derive(Debug, Clone)]
pub struct KeyspaceDef {
    /// Keyspace name
    pub name: String,

    /// Requested replication factor
    pub replication_factor: u32,

    /// Tables created with the keyspace
    pub tables: Vec<TableDef>,
}

impl KeyspaceDef {
    /// Keyspace with a single byte-ordered table, per the given config
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.keyspace.clone(),
            replication_factor: config.replication_factor,
            tables: vec![TableDef::bytes_ordered(&config.table)],
        }
    }
}

/// Connector to a store address
pub struct Cluster {
    /// Store address, used for every new connection
    addr: String,

    /// Connection timeouts applied to handles
    read_timeout_ms: u64,
    write_timeout_ms: u64,
}

impl Cluster {
    /// Create a connector for the store at `addr`
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }

    /// Create a connector from a config (address and timeouts)
    pub fn from_config(config: &Config) -> Self {
        Self {
            addr: config.store_addr.clone(),
            read_timeout_ms: config.read_timeout_ms,
            write_timeout_ms: config.write_timeout_ms,
        }
    }

    /// Provision a keyspace and its tables (get-or-create)
    ///
    /// Safe to call against a store that already has the keyspace.
    pub fn add_keyspace(&self, def: &KeyspaceDef) -> Result<()> {
        tracing::debug!("Provisioning keyspace '{}' at {}", def.name, self.addr);

        let mut conn = self.open_connection()?;
        let response = conn.call(&Request::CreateKeyspace {
            keyspace: def.name.clone(),
            replication_factor: def.replication_factor,
            tables: def.tables.clone(),
        })?;

        Self::expect_ok(response)
    }

    /// Open a handle to a keyspace
    ///
    /// The handle owns its own connection; the store is not asked whether
    /// the keyspace exists until the first operation.
    pub fn keyspace(&self, name: impl Into<String>) -> Result<Keyspace> {
        let conn = self.open_connection()?;
        Ok(Keyspace::new(name.into(), conn))
    }

    /// Check that the store answers pings
    pub fn ping(&self) -> Result<()> {
        let mut conn = self.open_connection()?;
        let response = conn.call(&Request::Ping)?;
        Self::expect_ok(response)
    }

    /// Get the store address
    pub fn addr(&self) -> &str {
        &self.addr
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Open a configured connection to the store
    fn open_connection(&self) -> Result<Connection> {
        let mut conn = Connection::connect(&self.addr)?;
        conn.set_timeouts(self.read_timeout_ms, self.write_timeout_ms)?;
        Ok(conn)
    }

    /// Map a non-OK response to an error
    fn expect_ok(response: Response) -> Result<()> {
        match response.status {
            Status::Ok => Ok(()),
            Status::NotFound | Status::Error => {
                Err(StorageError::Remote(response.error_message()))
            }
        }
    }
}
