//! Protocol Module
//!
//! Defines the wire protocol between the client and the column store.
//!
//! ## Frame Format (V1 - Simple Binary)
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────────────────────┐
//! │ Tag (1) │ Len (4) │ CRC (4) │          Body           │
//! └─────────┴─────────┴─────────┴─────────────────────────┘
//! ```
//!
//! The CRC32 covers the body only; a mismatch means the frame was damaged
//! in transit and is rejected as a protocol error.
//!
//! ### Request Tags
//! - 0x01: CREATE_KEYSPACE - Body: keyspace definition
//! - 0x02: READ_COLUMN     - Body: keyspace + table + column + key
//! - 0x03: MULTI_READ      - Body: keyspace + table + column + keys
//! - 0x04: MUTATE          - Body: keyspace + mutation batch
//! - 0x05: PING            - Body: empty
//!
//! ### Response Status (tag byte of a response frame)
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: ERROR
//!
//! Request and response bodies are bincode-encoded structures; response
//! payloads for multi-reads are an encoded row list.

mod command;
mod response;
mod codec;

pub use command::{Comparator, Mutation, Request, RequestType, TableDef};
pub use response::{decode_rows, encode_rows, Response, Status};
pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, HEADER_SIZE, MAX_BODY_SIZE,
};
