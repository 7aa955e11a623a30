//! Key-Value Facade
//!
//! Translates simple key/value CRUD calls into requests against the store,
//! addressing one fixed table and one fixed column. Values are UTF-8 text;
//! keys are generic over a per-call [`KeySerializer`].
//!
//! Every operation is one request/response exchange. The facade holds no
//! cache and no state beyond the keyspace reference and the fixed names,
//! so it is safe to call concurrently from multiple threads. Errors from
//! the store propagate unchanged; absence is never an error.

use std::collections::HashMap;
use std::hash::Hash;

use crate::client::Keyspace;
use crate::config::Config;
use crate::error::{Result, StorageError};
use crate::protocol::{decode_rows, Mutation, Request, Response, Status};
use crate::serializer::KeySerializer;

/// CRUD facade over one fixed table and column of a keyspace
///
/// The keyspace handle is borrowed: the caller owns it, the facade never
/// closes it, and several facades may share one handle.
pub struct KeyValueFacade<'a> {
    /// Namespace handle, owned by the caller
    keyspace: &'a Keyspace,

    /// Table (column family) all records live in
    table: String,

    /// Column name where values are stored
    column: String,
}

impl<'a> KeyValueFacade<'a> {
    /// Create a facade over the given table and column
    pub fn new(
        keyspace: &'a Keyspace,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            keyspace,
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a facade using the table/column names from a config
    pub fn from_config(keyspace: &'a Keyspace, config: &Config) -> Self {
        Self::new(keyspace, &config.table, &config.column)
    }

    /// Insert a new value keyed by key
    ///
    /// Overwrites any prior value unconditionally (last write wins).
    pub fn insert<K, S>(&self, key: &K, value: &str, serializer: &S) -> Result<()>
    where
        K: ?Sized,
        S: KeySerializer<K>,
    {
        let mutation = Mutation::Insert {
            table: self.table.clone(),
            key: serializer.to_bytes(key),
            column: self.column.clone(),
            value: value.as_bytes().to_vec(),
            timestamp: self.keyspace.create_clock(),
        };

        let response = self.keyspace.request(&Request::Mutate {
            keyspace: self.keyspace.name().to_string(),
            mutations: vec![mutation],
        })?;

        self.expect_ok(response)
    }

    /// Get a string value
    ///
    /// Returns `None` when no value exists under the key, whether it was
    /// never inserted or was deleted.
    pub fn get<K, S>(&self, key: &K, serializer: &S) -> Result<Option<String>>
    where
        K: ?Sized,
        S: KeySerializer<K>,
    {
        let response = self.keyspace.request(&Request::ReadColumn {
            keyspace: self.keyspace.name().to_string(),
            table: self.table.clone(),
            column: self.column.clone(),
            key: serializer.to_bytes(key),
        })?;

        match response.status {
            Status::Ok => {
                // An empty body is a stored empty string, not absence
                let bytes = response.payload.unwrap_or_default();
                Ok(Some(Self::decode_value(bytes)?))
            }
            Status::NotFound => Ok(None),
            Status::Error => Err(StorageError::Remote(response.error_message())),
        }
    }

    /// Get multiple values in one batched read
    ///
    /// The result contains only keys for which a value exists; missing
    /// keys are omitted entirely. Input order does not matter.
    pub fn get_multi<K, S>(&self, serializer: &S, keys: &[K]) -> Result<HashMap<K, String>>
    where
        K: Clone + Eq + Hash,
        S: KeySerializer<K>,
    {
        let encoded: Vec<Vec<u8>> = keys.iter().map(|k| serializer.to_bytes(k)).collect();

        // Wire bytes back to the caller's typed keys
        let mut by_encoding: HashMap<Vec<u8>, K> = HashMap::with_capacity(keys.len());
        for (key, bytes) in keys.iter().zip(encoded.iter()) {
            by_encoding.insert(bytes.clone(), key.clone());
        }

        let response = self.keyspace.request(&Request::MultiRead {
            keyspace: self.keyspace.name().to_string(),
            table: self.table.clone(),
            column: self.column.clone(),
            keys: encoded,
        })?;

        match response.status {
            Status::Ok => {
                let rows = match response.payload {
                    Some(payload) => decode_rows(&payload)?,
                    None => Vec::new(),
                };

                let mut result = HashMap::with_capacity(rows.len());
                for (key_bytes, value_bytes) in rows {
                    if let Some(key) = by_encoding.remove(&key_bytes) {
                        result.insert(key, Self::decode_value(value_bytes)?);
                    }
                }
                Ok(result)
            }
            Status::NotFound | Status::Error => {
                Err(StorageError::Remote(response.error_message()))
            }
        }
    }

    /// Insert multiple values as one batched mutation
    ///
    /// One insert per entry, each stamped with a clock obtained from the
    /// keyspace at build time; submitted as a single batch.
    pub fn insert_multi<K, S>(&self, entries: &HashMap<K, String>, serializer: &S) -> Result<()>
    where
        K: Eq + Hash,
        S: KeySerializer<K>,
    {
        let mutations: Vec<Mutation> = entries
            .iter()
            .map(|(key, value)| Mutation::Insert {
                table: self.table.clone(),
                key: serializer.to_bytes(key),
                column: self.column.clone(),
                value: value.as_bytes().to_vec(),
                timestamp: self.keyspace.create_clock(),
            })
            .collect();

        let response = self.keyspace.request(&Request::Mutate {
            keyspace: self.keyspace.name().to_string(),
            mutations,
        })?;

        self.expect_ok(response)
    }

    /// Delete multiple values as one batched mutation
    ///
    /// Deleting a key with no value is a no-op, not an error.
    pub fn delete<K, S>(&self, serializer: &S, keys: &[K]) -> Result<()>
    where
        S: KeySerializer<K>,
    {
        let mutations: Vec<Mutation> = keys
            .iter()
            .map(|key| Mutation::Delete {
                table: self.table.clone(),
                key: serializer.to_bytes(key),
                column: self.column.clone(),
            })
            .collect();

        let response = self.keyspace.request(&Request::Mutate {
            keyspace: self.keyspace.name().to_string(),
            mutations,
        })?;

        self.expect_ok(response)
    }

    /// Get the table name this facade addresses
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Get the column name this facade addresses
    pub fn column(&self) -> &str {
        &self.column
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Decode stored value bytes as UTF-8 text
    fn decode_value(bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes)
            .map_err(|e| StorageError::Serialization(format!("Value is not UTF-8: {}", e)))
    }

    /// Map a non-OK mutation response to an error
    fn expect_ok(&self, response: Response) -> Result<()> {
        match response.status {
            Status::Ok => Ok(()),
            Status::NotFound | Status::Error => {
                Err(StorageError::Remote(response.error_message()))
            }
        }
    }
}
