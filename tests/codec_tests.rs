//! Codec Tests
//!
//! Tests for request and response encoding/decoding.

use std::io::Cursor;

use pillarkv::protocol::{
    decode_request, decode_response, decode_rows, encode_request, encode_response, read_request,
    read_response, write_request, write_response, Comparator, Mutation, Request, Response, Status,
    TableDef, HEADER_SIZE,
};

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_read_column() {
    let req = Request::ReadColumn {
        keyspace: "keyspace1".to_string(),
        table: "standard1".to_string(),
        column: "v".to_string(),
        key: b"hello".to_vec(),
    };
    let encoded = encode_request(&req).unwrap();
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn test_encode_decode_multi_read() {
    let req = Request::MultiRead {
        keyspace: "keyspace1".to_string(),
        table: "standard1".to_string(),
        column: "v".to_string(),
        keys: vec![b"k1".to_vec(), b"k2".to_vec(), b"k3".to_vec()],
    };
    let encoded = encode_request(&req).unwrap();
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn test_encode_decode_mutate() {
    let req = Request::Mutate {
        keyspace: "keyspace1".to_string(),
        mutations: vec![
            Mutation::Insert {
                table: "standard1".to_string(),
                key: b"mykey".to_vec(),
                column: "v".to_string(),
                value: b"myvalue".to_vec(),
                timestamp: 1_700_000_000_000_000,
            },
            Mutation::Delete {
                table: "standard1".to_string(),
                key: b"gone".to_vec(),
                column: "v".to_string(),
            },
        ],
    };
    let encoded = encode_request(&req).unwrap();
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn test_encode_decode_create_keyspace() {
    let req = Request::CreateKeyspace {
        keyspace: "keyspace1".to_string(),
        replication_factor: 1,
        tables: vec![TableDef {
            name: "standard1".to_string(),
            comparator: Comparator::Bytes,
        }],
    };
    let encoded = encode_request(&req).unwrap();
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn test_encode_decode_ping() {
    let encoded = encode_request(&Request::Ping).unwrap();
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, Request::Ping);
}

#[test]
fn test_encode_decode_empty_key() {
    let req = Request::ReadColumn {
        keyspace: "ks".to_string(),
        table: "t".to_string(),
        column: "v".to_string(),
        key: vec![],
    };
    let encoded = encode_request(&req).unwrap();

    match decode_request(&encoded).unwrap() {
        Request::ReadColumn { key, .. } => assert!(key.is_empty()),
        other => panic!("Expected READ_COLUMN, got {:?}", other),
    }
}

#[test]
fn test_encode_decode_binary_key_and_value() {
    // Binary data containing null bytes and high bytes
    let binary_key: Vec<u8> = vec![0x00, 0x01, 0xFF, 0xFE, 0x80];
    let binary_value: Vec<u8> = (0..=255).collect();

    let req = Request::Mutate {
        keyspace: "ks".to_string(),
        mutations: vec![Mutation::Insert {
            table: "t".to_string(),
            key: binary_key.clone(),
            column: "v".to_string(),
            value: binary_value.clone(),
            timestamp: 42,
        }],
    };
    let encoded = encode_request(&req).unwrap();

    match decode_request(&encoded).unwrap() {
        Request::Mutate { mutations, .. } => match &mutations[0] {
            Mutation::Insert { key, value, .. } => {
                assert_eq!(key, &binary_key);
                assert_eq!(value, &binary_value);
            }
            other => panic!("Expected INSERT mutation, got {:?}", other),
        },
        other => panic!("Expected MUTATE, got {:?}", other),
    }
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_response_ok() {
    let resp = Response::ok(Some(b"value".to_vec()));
    let encoded = encode_response(&resp);
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, Some(b"value".to_vec()));
}

#[test]
fn test_encode_decode_response_ok_no_payload() {
    let resp = Response::ok(None);
    let encoded = encode_response(&resp);
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_encode_decode_response_not_found() {
    let resp = Response::not_found();
    let encoded = encode_response(&resp);
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::NotFound);
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_encode_decode_response_error() {
    let resp = Response::error("something went wrong");
    let encoded = encode_response(&resp);
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Error);
    assert_eq!(decoded.error_message(), "something went wrong");
}

#[test]
fn test_encode_decode_row_list_payload() {
    let rows = vec![
        (b"k1".to_vec(), b"v1".to_vec()),
        (b"k2".to_vec(), b"v2".to_vec()),
    ];
    let resp = Response::rows(&rows).unwrap();
    let encoded = encode_response(&resp);
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    let round_tripped = decode_rows(decoded.payload.as_deref().unwrap()).unwrap();
    assert_eq!(round_tripped, rows);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_incomplete_header() {
    let bytes = [0x01, 0x00, 0x00]; // Only 3 bytes, need 9
    let result = decode_request(&bytes);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Incomplete header"));
}

#[test]
fn test_incomplete_body() {
    // Take a valid frame and drop its last byte
    let encoded = encode_request(&Request::Ping).unwrap();
    let result = decode_request(&encoded[..encoded.len() - 1]);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Incomplete body"));
}

#[test]
fn test_crc_mismatch_rejected() {
    let mut encoded = encode_request(&Request::ReadColumn {
        keyspace: "ks".to_string(),
        table: "t".to_string(),
        column: "v".to_string(),
        key: b"key".to_vec(),
    })
    .unwrap();

    // Corrupt one body byte; the header CRC no longer matches
    let last = encoded.len() - 1;
    encoded[last] ^= 0xFF;

    let result = decode_request(&encoded);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("CRC mismatch"));
}

#[test]
fn test_unknown_request_tag() {
    // Valid envelope shape, empty body, unknown tag
    let bytes = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let result = decode_request(&bytes);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown request tag"));
}

#[test]
fn test_unknown_response_status() {
    let bytes = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let result = decode_response(&bytes);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Unknown response status"));
}

#[test]
fn test_oversized_body_rejected() {
    // Header claiming a body far beyond the limit
    let mut bytes = vec![0x05];
    bytes.extend_from_slice(&u32::MAX.to_be_bytes()); // len
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // crc
    let result = decode_request(&bytes);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Body too large"));
}

#[test]
fn test_mismatched_tag_rejected() {
    // Re-tag a PING frame as READ_COLUMN; body decodes but disagrees
    let mut encoded = encode_request(&Request::Ping).unwrap();
    encoded[0] = 0x02;
    let result = decode_request(&encoded);
    assert!(result.is_err());
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_write_read_request() {
    let req = Request::ReadColumn {
        keyspace: "ks".to_string(),
        table: "t".to_string(),
        column: "v".to_string(),
        key: b"key".to_vec(),
    };

    let mut buffer = Vec::new();
    write_request(&mut buffer, &req).unwrap();

    let mut cursor = Cursor::new(buffer);
    let decoded = read_request(&mut cursor).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn test_stream_write_read_response() {
    let resp = Response::ok(Some(b"result".to_vec()));

    let mut buffer = Vec::new();
    write_response(&mut buffer, &resp).unwrap();

    let mut cursor = Cursor::new(buffer);
    let decoded = read_response(&mut cursor).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, Some(b"result".to_vec()));
}

#[test]
fn test_stream_multiple_requests() {
    let requests = vec![
        Request::Ping,
        Request::Mutate {
            keyspace: "ks".to_string(),
            mutations: vec![Mutation::Insert {
                table: "t".to_string(),
                key: b"k1".to_vec(),
                column: "v".to_string(),
                value: b"v1".to_vec(),
                timestamp: 1,
            }],
        },
        Request::ReadColumn {
            keyspace: "ks".to_string(),
            table: "t".to_string(),
            column: "v".to_string(),
            key: b"k1".to_vec(),
        },
    ];

    // Write all requests to buffer
    let mut buffer = Vec::new();
    for req in &requests {
        write_request(&mut buffer, req).unwrap();
    }

    // Read them back
    let mut cursor = Cursor::new(buffer);
    for expected in &requests {
        let decoded = read_request(&mut cursor).unwrap();
        assert_eq!(&decoded, expected);
    }
}

#[test]
fn test_stream_multiple_responses() {
    let responses = vec![
        Response::ok(Some(b"data".to_vec())),
        Response::not_found(),
        Response::error("oops"),
        Response::ok(None),
    ];

    // Write all responses to buffer
    let mut buffer = Vec::new();
    for resp in &responses {
        write_response(&mut buffer, resp).unwrap();
    }

    // Read them back
    let mut cursor = Cursor::new(buffer);
    for expected in &responses {
        let decoded = read_response(&mut cursor).unwrap();
        assert_eq!(decoded.status, expected.status);
        assert_eq!(decoded.payload, expected.payload);
    }
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_ping() {
    let encoded = encode_request(&Request::Ping).unwrap();

    // Expected: [0x05][len:4][crc:4][body]
    assert_eq!(encoded[0], 0x05); // PING tag
    let body_len = u32::from_be_bytes([encoded[1], encoded[2], encoded[3], encoded[4]]) as usize;
    assert_eq!(encoded.len(), HEADER_SIZE + body_len);
}

#[test]
fn test_wire_format_response_ok() {
    let resp = Response::ok(Some(b"hi".to_vec()));
    let encoded = encode_response(&resp);

    // Expected: [0x00][0x00 0x00 0x00 0x02][crc:4][h i]
    assert_eq!(encoded[0], 0x00); // OK status
    assert_eq!(&encoded[1..5], &[0x00, 0x00, 0x00, 0x02]); // body len = 2
    assert_eq!(&encoded[HEADER_SIZE..], b"hi");
    assert_eq!(encoded.len(), HEADER_SIZE + 2);
}
