//! PillarKV Demo Binary
//!
//! Scripted demonstration against a running store: single insert/get,
//! multi insert/get, delete, and an absence check. Progress goes to
//! stdout; any storage error propagates out of `main` and terminates
//! the process.

use std::collections::HashMap;

use clap::Parser;

use pillarkv::client::KeyspaceDef;
use pillarkv::{Cluster, Config, KeyValueFacade, StringSerializer};

/// PillarKV Demo
#[derive(Parser, Debug)]
#[command(name = "pillarkv-demo")]
#[command(about = "Scripted key-value demo against a PillarKV store")]
struct Args {
    /// Store address
    #[arg(short, long, default_value = "127.0.0.1:9160")]
    server: String,

    /// Keyspace to provision and use
    #[arg(short, long, default_value = "keyspace1")]
    keyspace: String,
}

fn main() -> pillarkv::Result<()> {
    let args = Args::parse();

    let config = Config::builder()
        .store_addr(&args.server)
        .keyspace(&args.keyspace)
        .build();

    // Provision the keyspace and its table, then open a handle
    let cluster = Cluster::from_config(&config);
    cluster.add_keyspace(&KeyspaceDef::from_config(&config))?;
    let keyspace = cluster.keyspace(&config.keyspace)?;

    let facade = KeyValueFacade::from_config(&keyspace, &config);

    // Single key-value
    let key1 = "key1";
    let value1 = "value1";
    println!("Insert into storage single keyValue: {}={}", key1, value1);
    facade.insert(key1, value1, &StringSerializer)?;
    println!(
        "Get value for key {}: {}",
        key1,
        display(facade.get(key1, &StringSerializer)?)
    );

    // Batched insert and read
    let mut key_values = HashMap::new();
    key_values.insert("mapKey1".to_string(), "mapValue1".to_string());
    key_values.insert("mapKey2".to_string(), "mapValue2".to_string());
    println!("Insert into storage multiValue map: {:?}", key_values);
    facade.insert_multi(&key_values, &StringSerializer)?;

    let keys: Vec<String> = key_values.keys().cloned().collect();
    println!(
        "Get values for keys {:?}: {:?}",
        keys,
        facade.get_multi(&StringSerializer, &keys)?
    );

    // Batched delete and absence check
    println!("Deleting from storage mapKey1");
    facade.delete(&StringSerializer, &["mapKey1"])?;

    println!(
        "Value for key mapKey1 doesn't exist: {}",
        facade.get("mapKey1", &StringSerializer)?.is_none()
    );

    Ok(())
}

/// Human-readable form of an optional value
fn display(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<absent>".to_string())
}
