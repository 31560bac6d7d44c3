//! Request DTOs for the exchange server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::exchange::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

/// Request body for the store operation (POST /store)
///
/// # Fields
/// - `key`: identifier the consumer will retrieve the value under
/// - `value`: the value to exchange
/// - `ttl_ms`: time-to-live in milliseconds; the entry becomes
///   unretrievable once it elapses
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The entry key
    pub key: String,
    /// The value to store
    pub value: String,
    /// TTL in milliseconds
    pub ttl_ms: u64,
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Keys flow into gate names, so they are restricted to a
    /// service-name-legal charset. Returns an error message if validation
    /// fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if !self
            .key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Some("Key may only contain ASCII letters, digits, '_' and '-'".to_string());
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 60000}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert_eq!(req.ttl_ms, 60000);
    }

    #[test]
    fn test_store_request_missing_ttl_rejected() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        assert!(serde_json::from_str::<StoreRequest>(json).is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        let req = StoreRequest {
            key: "".to_string(),
            value: "test".to_string(),
            ttl_ms: 1000,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_illegal_key_characters() {
        let req = StoreRequest {
            key: "has space".to_string(),
            value: "test".to_string(),
            ttl_ms: 1000,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = StoreRequest {
            key: "valid_key-1".to_string(),
            value: "test".to_string(),
            ttl_ms: 1000,
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_zero_ttl_allowed() {
        // ttl 0 stores an entry that is immediately expired; it is not a
        // request error
        let req = StoreRequest {
            key: "k".to_string(),
            value: "v".to_string(),
            ttl_ms: 0,
        };
        assert!(req.validate().is_none());
    }
}
