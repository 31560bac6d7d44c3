//! Property-Based Tests for the Exchange Module
//!
//! Uses proptest to verify the at-most-once and isolation properties over
//! generated keys and values.

use std::sync::Arc;

use bytes::Bytes;
use proptest::prelude::*;

use crate::error::ExchangeError;
use crate::exchange::{gate_name, Exchange};
use crate::gate::MemoryGateService;
use crate::repo::MemoryBlobRepository;

// == Test Configuration ==
const TEST_NAMESPACE: &str = "prop";

// == Strategies ==
/// Generates valid keys (gate-name-legal charset, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,64}".prop_map(|s| s)
}

/// Generates valid values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}".prop_map(|s| s)
}

fn new_exchange() -> Exchange {
    Exchange::new(
        Arc::new(MemoryBlobRepository::new("drops")),
        Arc::new(MemoryGateService::new()),
        TEST_NAMESPACE,
    )
}

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any valid key-value pair, storing and then retrieving (before
    // expiry) returns the stored value exactly once; every further retrieve
    // observes Gone.
    #[test]
    fn prop_single_read(key in valid_key_strategy(), value in valid_value_strategy()) {
        rt().block_on(async {
            let exchange = new_exchange();

            exchange.store(&key, Bytes::from(value.clone()), 60_000).await.unwrap();

            let first = exchange.retrieve(&key).await.unwrap();
            prop_assert_eq!(first, Bytes::from(value));

            let second = exchange.retrieve(&key).await;
            prop_assert!(matches!(second, Err(ExchangeError::Gone(_))));
            Ok(())
        })?;
    }

    // For any two distinct keys, operations on one never interfere with the
    // other.
    #[test]
    fn prop_key_isolation(
        k1 in valid_key_strategy(),
        k2 in valid_key_strategy(),
        v1 in valid_value_strategy(),
        v2 in valid_value_strategy(),
    ) {
        prop_assume!(k1 != k2);
        rt().block_on(async {
            let exchange = new_exchange();

            exchange.store(&k1, Bytes::from(v1.clone()), 60_000).await.unwrap();
            exchange.store(&k2, Bytes::from(v2.clone()), 60_000).await.unwrap();

            prop_assert_eq!(exchange.retrieve(&k1).await.unwrap(), Bytes::from(v1));
            // Consuming k1 leaves k2 untouched
            prop_assert_eq!(exchange.retrieve(&k2).await.unwrap(), Bytes::from(v2));
            Ok(())
        })?;
    }

    // Retrieving a key that was never stored is Gone, not a server failure.
    #[test]
    fn prop_never_stored_is_gone(key in valid_key_strategy()) {
        rt().block_on(async {
            let exchange = new_exchange();

            let result = exchange.retrieve(&key).await;
            prop_assert!(matches!(result, Err(ExchangeError::Gone(_))));
            Ok(())
        })?;
    }

    // A zero TTL makes the entry unretrievable from the moment it is stored,
    // and the sweep reclaims it exactly once.
    #[test]
    fn prop_expired_entry_swept_once(key in valid_key_strategy(), value in valid_value_strategy()) {
        rt().block_on(async {
            let exchange = new_exchange();

            exchange.store(&key, Bytes::from(value), 0).await.unwrap();

            let result = exchange.retrieve(&key).await;
            prop_assert!(matches!(result, Err(ExchangeError::Gone(_))));

            prop_assert_eq!(exchange.sweep().await.unwrap(), 1);
            prop_assert_eq!(exchange.sweep().await.unwrap(), 0);
            Ok(())
        })?;
    }

    // Gate names are deterministic and collision-free across keys within a
    // fixed namespace.
    #[test]
    fn prop_gate_name_injective(k1 in valid_key_strategy(), k2 in valid_key_strategy()) {
        prop_assert_eq!(
            gate_name(TEST_NAMESPACE, &k1),
            gate_name(TEST_NAMESPACE, &k1)
        );
        if k1 != k2 {
            prop_assert_ne!(gate_name(TEST_NAMESPACE, &k1), gate_name(TEST_NAMESPACE, &k2));
        }
    }
}
