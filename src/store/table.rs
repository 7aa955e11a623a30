//! Column family
//!
//! Sparse row/column table. Not internally synchronized: the store engine
//! guards access, so a mutation batch can span several tables under one
//! write guard.

use std::collections::HashMap;

use crate::protocol::Comparator;

/// One stored column value with its mutation timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Value bytes
    pub value: Vec<u8>,

    /// Mutation clock the write carried (epoch microseconds)
    pub timestamp: i64,
}

/// A sparse table: rows keyed by bytes, each row a set of named columns
#[derive(Debug)]
pub struct ColumnFamily {
    /// Row key comparator declared at creation
    comparator: Comparator,

    /// Rows; absent key means absent row
    rows: HashMap<Vec<u8>, HashMap<String, Cell>>,
}

impl ColumnFamily {
    /// Create an empty table with the given comparator
    pub fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            rows: HashMap::new(),
        }
    }

    /// Get the comparator declared for this table
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Read one column of one row
    pub fn read(&self, key: &[u8], column: &str) -> Option<&Cell> {
        self.rows.get(key).and_then(|row| row.get(column))
    }

    /// Write a column, resolved last-write-wins by timestamp
    ///
    /// An equal-or-newer timestamp replaces the cell, so a re-insert
    /// within the same clock tick still lands.
    pub fn insert(&mut self, key: Vec<u8>, column: String, value: Vec<u8>, timestamp: i64) {
        let row = self.rows.entry(key).or_default();

        match row.get(&column) {
            Some(existing) if existing.timestamp > timestamp => {
                // Stale write, the stored cell is newer
            }
            _ => {
                row.insert(column, Cell { value, timestamp });
            }
        }
    }

    /// Remove a column; drops the row once its last column is gone
    ///
    /// Removing an absent column is a no-op.
    pub fn delete(&mut self, key: &[u8], column: &str) {
        if let Some(row) = self.rows.get_mut(key) {
            row.remove(column);
            if row.is_empty() {
                self.rows.remove(key);
            }
        }
    }

    /// Number of rows currently present
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
