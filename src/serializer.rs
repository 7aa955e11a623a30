//! Key serializers
//!
//! Strategy objects that turn a typed key into wire bytes. The facade is
//! generic over the key type and takes a serializer per call, so different
//! calls may address the store with different key encodings.

/// Serializes a key of type `K` to wire bytes.
///
/// Implementations must be pure: the same key always produces the same
/// bytes, since the store addresses rows by the encoded form.
pub trait KeySerializer<K: ?Sized> {
    /// Encode a key to its wire representation
    fn to_bytes(&self, key: &K) -> Vec<u8>;
}

/// UTF-8 string keys
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

impl KeySerializer<str> for StringSerializer {
    fn to_bytes(&self, key: &str) -> Vec<u8> {
        key.as_bytes().to_vec()
    }
}

impl KeySerializer<String> for StringSerializer {
    fn to_bytes(&self, key: &String) -> Vec<u8> {
        key.as_bytes().to_vec()
    }
}

impl KeySerializer<&str> for StringSerializer {
    fn to_bytes(&self, key: &&str) -> Vec<u8> {
        key.as_bytes().to_vec()
    }
}

/// Raw byte keys (identity encoding)
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesSerializer;

impl KeySerializer<Vec<u8>> for BytesSerializer {
    fn to_bytes(&self, key: &Vec<u8>) -> Vec<u8> {
        key.clone()
    }
}

impl KeySerializer<[u8]> for BytesSerializer {
    fn to_bytes(&self, key: &[u8]) -> Vec<u8> {
        key.to_vec()
    }
}

/// u64 keys, big-endian so byte order matches numeric order
#[derive(Debug, Clone, Copy, Default)]
pub struct U64Serializer;

impl KeySerializer<u64> for U64Serializer {
    fn to_bytes(&self, key: &u64) -> Vec<u8> {
        key.to_be_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_serializer_utf8_bytes() {
        let ser = StringSerializer;
        assert_eq!(ser.to_bytes("key1"), b"key1".to_vec());
        assert_eq!(ser.to_bytes(&"key1".to_string()), b"key1".to_vec());
    }

    #[test]
    fn test_bytes_serializer_identity() {
        let ser = BytesSerializer;
        let key: Vec<u8> = vec![0x00, 0xFF, 0x80];
        assert_eq!(ser.to_bytes(&key), key);
    }

    #[test]
    fn test_u64_serializer_big_endian() {
        let ser = U64Serializer;
        assert_eq!(ser.to_bytes(&1u64), vec![0, 0, 0, 0, 0, 0, 0, 1]);
        // Big-endian keeps byte comparison consistent with numeric order
        assert!(ser.to_bytes(&1u64) < ser.to_bytes(&256u64));
    }
}
