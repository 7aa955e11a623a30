//! Column Store Engine
//!
//! Routes protocol requests to the in-memory keyspace registry.
//!
//! ## Concurrency Model
//!
//! - Reads (READ_COLUMN, MULTI_READ): shared read guard, fully concurrent
//! - Mutations (MUTATE): one exclusive write guard for the whole batch,
//!   so readers observe all of a batch or none of it
//! - Provisioning (CREATE_KEYSPACE): exclusive write guard, idempotent
//!
//! All methods take `&self`; the store is shared across session workers
//! behind an `Arc`.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Result, StorageError};
use crate::protocol::{Mutation, Request, Response, TableDef};

use super::ColumnFamily;

/// One provisioned keyspace
#[derive(Debug)]
struct KeyspaceData {
    /// Replication factor recorded at provisioning (informational on a
    /// single node)
    replication_factor: u32,

    /// Tables by name
    tables: HashMap<String, ColumnFamily>,
}

/// The in-memory column store
pub struct ColumnStore {
    /// Keyspace registry, the only shared mutable state
    keyspaces: RwLock<HashMap<String, KeyspaceData>>,
}

impl ColumnStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            keyspaces: RwLock::new(HashMap::new()),
        }
    }

    /// Execute a request
    ///
    /// Routes requests to the appropriate handlers.
    pub fn execute(&self, request: Request) -> Result<Response> {
        match request {
            Request::CreateKeyspace {
                keyspace,
                replication_factor,
                tables,
            } => self.create_keyspace(keyspace, replication_factor, tables),
            Request::ReadColumn {
                keyspace,
                table,
                column,
                key,
            } => self.read_column(&keyspace, &table, &column, &key),
            Request::MultiRead {
                keyspace,
                table,
                column,
                keys,
            } => self.multi_read(&keyspace, &table, &column, &keys),
            Request::Mutate {
                keyspace,
                mutations,
            } => self.mutate(&keyspace, mutations),
            Request::Ping => Ok(Response::ok(Some(b"PONG".to_vec()))),
        }
    }

    /// Provision a keyspace and its tables (get-or-create)
    ///
    /// Re-provisioning an existing keyspace adds any missing tables and
    /// leaves existing data untouched.
    fn create_keyspace(
        &self,
        name: String,
        replication_factor: u32,
        tables: Vec<TableDef>,
    ) -> Result<Response> {
        let mut keyspaces = self.keyspaces.write();

        let data = keyspaces.entry(name.clone()).or_insert_with(|| {
            tracing::info!(
                "Creating keyspace '{}' (replication factor {})",
                name,
                replication_factor
            );
            KeyspaceData {
                replication_factor,
                tables: HashMap::new(),
            }
        });

        for def in tables {
            data.tables
                .entry(def.name.clone())
                .or_insert_with(|| ColumnFamily::new(def.comparator));
        }

        Ok(Response::ok(None))
    }

    /// Point read of one column under one key
    fn read_column(
        &self,
        keyspace: &str,
        table: &str,
        column: &str,
        key: &[u8],
    ) -> Result<Response> {
        let keyspaces = self.keyspaces.read();
        let cf = Self::table_of(&keyspaces, keyspace, table)?;

        match cf.read(key, column) {
            Some(cell) => Ok(Response::ok(Some(cell.value.clone()))),
            None => Ok(Response::not_found()),
        }
    }

    /// Batched read of one column under many keys
    ///
    /// Returns only rows that hold a value; absent keys are skipped, never
    /// reported as empty rows.
    fn multi_read(
        &self,
        keyspace: &str,
        table: &str,
        column: &str,
        keys: &[Vec<u8>],
    ) -> Result<Response> {
        let keyspaces = self.keyspaces.read();
        let cf = Self::table_of(&keyspaces, keyspace, table)?;

        let mut rows = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(cell) = cf.read(key, column) {
                rows.push((key.clone(), cell.value.clone()));
            }
        }

        Response::rows(&rows)
    }

    /// Apply a mutation batch under one write guard
    ///
    /// Every mutation is validated against the schema before the first one
    /// is applied, so a batch naming an unknown table changes nothing.
    fn mutate(&self, keyspace: &str, mutations: Vec<Mutation>) -> Result<Response> {
        let mut keyspaces = self.keyspaces.write();

        let data = keyspaces
            .get_mut(keyspace)
            .ok_or_else(|| StorageError::UnknownKeyspace(keyspace.to_string()))?;

        for mutation in &mutations {
            let table = match mutation {
                Mutation::Insert { table, .. } => table,
                Mutation::Delete { table, .. } => table,
            };
            if !data.tables.contains_key(table) {
                return Err(StorageError::UnknownTable(table.clone()));
            }
        }

        for mutation in mutations {
            match mutation {
                Mutation::Insert {
                    table,
                    key,
                    column,
                    value,
                    timestamp,
                } => {
                    // Validated above
                    if let Some(cf) = data.tables.get_mut(&table) {
                        cf.insert(key, column, value, timestamp);
                    }
                }
                Mutation::Delete { table, key, column } => {
                    if let Some(cf) = data.tables.get_mut(&table) {
                        cf.delete(&key, &column);
                    }
                }
            }
        }

        Ok(Response::ok(None))
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of provisioned keyspaces
    pub fn keyspace_count(&self) -> usize {
        self.keyspaces.read().len()
    }

    /// Whether a keyspace exists
    pub fn contains_keyspace(&self, name: &str) -> bool {
        self.keyspaces.read().contains_key(name)
    }

    /// Replication factor a keyspace was provisioned with
    pub fn replication_factor(&self, name: &str) -> Option<u32> {
        self.keyspaces.read().get(name).map(|d| d.replication_factor)
    }

    /// Number of rows currently in a table
    pub fn row_count(&self, keyspace: &str, table: &str) -> Result<usize> {
        let keyspaces = self.keyspaces.read();
        Ok(Self::table_of(&keyspaces, keyspace, table)?.row_count())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Resolve a table inside a keyspace, or the matching schema error
    fn table_of<'a>(
        keyspaces: &'a HashMap<String, KeyspaceData>,
        keyspace: &str,
        table: &str,
    ) -> Result<&'a ColumnFamily> {
        let data = keyspaces
            .get(keyspace)
            .ok_or_else(|| StorageError::UnknownKeyspace(keyspace.to_string()))?;

        data.tables
            .get(table)
            .ok_or_else(|| StorageError::UnknownTable(table.to_string()))
    }
}

impl Default for ColumnStore {
    fn default() -> Self {
        Self::new()
    }
}
