//! Keyspace Handle
//!
//! The namespace handle callers pass by reference into the facade.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::{Request, Response};

use super::Connection;

/// Handle to one keyspace on the store
///
/// Owns one connection; wire access is serialized through a mutex so the
/// handle is safe to share across threads. Each request is independent,
/// the handle keeps no state between calls.
pub struct Keyspace {
    /// Keyspace name, stamped into every request
    name: String,

    /// Guarded connection; one request/response in flight at a time
    conn: Mutex<Connection>,
}

impl Keyspace {
    /// Wrap a connection as a keyspace handle
    pub(crate) fn new(name: String, conn: Connection) -> Self {
        Self {
            name,
            conn: Mutex::new(conn),
        }
    }

    /// Get the keyspace name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Issue one request against the store (blocking)
    pub fn request(&self, request: &Request) -> Result<Response> {
        self.conn.lock().call(request)
    }

    /// Create a mutation clock: microseconds since the Unix epoch
    ///
    /// Mutations carry this timestamp; the store resolves concurrent
    /// writes to the same cell by the highest clock (last write wins).
    pub fn create_clock(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0)
    }
}
