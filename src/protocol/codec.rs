//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Frame Format
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────────────────────┐
//! │ Tag (1) │ Len (4) │ CRC (4) │          Body           │
//! └─────────┴─────────┴─────────┴─────────────────────────┘
//! ```
//!
//! Requests carry a bincode-encoded [`Request`] as the body; the tag
//! duplicates the request type so a peer can dispatch and validate without
//! decoding the body first. Responses carry the raw payload bytes as the
//! body with the status as the tag. The CRC32 is computed over the body.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, StorageError};

use super::{Request, RequestType, Response, Status};

/// Header size: 1 byte tag + 4 bytes length + 4 bytes CRC32
pub const HEADER_SIZE: usize = 9;

/// Maximum body size (16 MB)
pub const MAX_BODY_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Frame Envelope
// =============================================================================

/// Assemble a frame from a tag and body
fn encode_frame(tag: u8, body: &[u8]) -> Vec<u8> {
    let crc = crc32fast::hash(body);

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + body.len());
    frame.put_u8(tag);
    frame.put_u32(body.len() as u32);
    frame.put_u32(crc);
    frame.put_slice(body);

    frame.to_vec()
}

/// Split a frame into its tag and body, verifying length and CRC
fn decode_frame(bytes: &[u8]) -> Result<(u8, &[u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(StorageError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut header = &bytes[..HEADER_SIZE];
    let tag = header.get_u8();
    let body_len = header.get_u32() as usize;
    let crc = header.get_u32();

    if body_len > MAX_BODY_SIZE as usize {
        return Err(StorageError::Protocol(format!(
            "Body too large: {} bytes (max {})",
            body_len, MAX_BODY_SIZE
        )));
    }

    let total_len = HEADER_SIZE + body_len;
    if bytes.len() < total_len {
        return Err(StorageError::Protocol(format!(
            "Incomplete body: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    let body = &bytes[HEADER_SIZE..total_len];
    let actual_crc = crc32fast::hash(body);
    if actual_crc != crc {
        return Err(StorageError::Protocol(format!(
            "CRC mismatch: header says {:#010x}, body hashes to {:#010x}",
            crc, actual_crc
        )));
    }

    Ok((tag, body))
}

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to a frame
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    let body = bincode::serialize(request)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(encode_frame(request.request_type() as u8, &body))
}

/// Decode a request from a frame
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    let (tag, body) = decode_frame(bytes)?;

    let request_type = RequestType::from_tag(tag).ok_or_else(|| {
        StorageError::Protocol(format!("Unknown request tag: 0x{:02x}", tag))
    })?;

    let request: Request = bincode::deserialize(body)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    // The tag exists for dispatch without body decoding; a mismatch means
    // the peer framed a different request than it encoded.
    if request.request_type() != request_type {
        return Err(StorageError::Protocol(format!(
            "Frame tag 0x{:02x} does not match body request type {:?}",
            tag,
            request.request_type()
        )));
    }

    Ok(request)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to a frame
pub fn encode_response(response: &Response) -> Vec<u8> {
    let body = response.payload.as_deref().unwrap_or(&[]);
    encode_frame(response.status as u8, body)
}

/// Decode a response from a frame
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (tag, body) = decode_frame(bytes)?;

    let status = Status::from_tag(tag).ok_or_else(|| {
        StorageError::Protocol(format!("Unknown response status: 0x{:02x}", tag))
    })?;

    let payload = if body.is_empty() {
        None
    } else {
        Some(body.to_vec())
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one full frame (header + body) from a stream
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let body_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;

    if body_len > MAX_BODY_SIZE as usize {
        return Err(StorageError::Protocol(format!(
            "Body too large: {} bytes (max {})",
            body_len, MAX_BODY_SIZE
        )));
    }

    let mut frame = vec![0u8; HEADER_SIZE + body_len];
    frame[..HEADER_SIZE].copy_from_slice(&header);
    if body_len > 0 {
        reader.read_exact(&mut frame[HEADER_SIZE..])?;
    }

    Ok(frame)
}

/// Read a complete request from a stream
///
/// Blocks until a complete request is received or an error occurs
pub fn read_request<R: Read>(reader: &mut R) -> Result<Request> {
    let frame = read_frame(reader)?;
    decode_request(&frame)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let frame = read_frame(reader)?;
    decode_response(&frame)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
