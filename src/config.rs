//! Configuration for PillarKV
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for client and server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Addressing
    // -------------------------------------------------------------------------
    /// Address of the remote store (client side)
    pub store_addr: String,

    /// Keyspace this client operates in
    pub keyspace: String,

    /// Table (column family) holding all records
    pub table: String,

    /// Column name where values are stored
    pub column: String,

    /// Replication factor requested when provisioning the keyspace
    pub replication_factor: u32,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (server side)
    pub listen_addr: String,

    /// Number of session worker threads (server side)
    pub worker_threads: usize,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_addr: "127.0.0.1:9160".to_string(),
            keyspace: "keyspace1".to_string(),
            table: "standard1".to_string(),
            column: "v".to_string(),
            replication_factor: 1,
            listen_addr: "127.0.0.1:9160".to_string(),
            worker_threads: 8,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the remote store address
    pub fn store_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.store_addr = addr.into();
        self
    }

    /// Set the keyspace name
    pub fn keyspace(mut self, name: impl Into<String>) -> Self {
        self.config.keyspace = name.into();
        self
    }

    /// Set the table (column family) name
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.config.table = name.into();
        self
    }

    /// Set the column name values are stored under
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.config.column = name.into();
        self
    }

    /// Set the replication factor used at provisioning time
    pub fn replication_factor(mut self, factor: u32) -> Self {
        self.config.replication_factor = factor;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of session worker threads
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
