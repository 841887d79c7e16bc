//! Property-Based Tests for the Memory Store
//!
//! Uses proptest to check the store against a plain HashMap reference
//! model over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;

use serde_json::{json, Value};
use tokio::runtime::Builder;

use crate::store::{Expiry, MemoryStore, Store};

// == Strategies ==
/// Generates cache keys from a small pool so sequences collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d][0-9]"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}"
}

/// A single store operation. Expirations are either `Never` or far in
/// the future, so the model never has to reason about elapsed time.
#[derive(Debug, Clone)]
enum StoreOp {
    Put { key: String, value: String, forever: bool },
    Get { key: String },
    Delete { key: String },
    Flush,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), any::<bool>())
            .prop_map(|(key, value, forever)| StoreOp::Put { key, value, forever }),
        3 => key_strategy().prop_map(|key| StoreOp::Get { key }),
        2 => key_strategy().prop_map(|key| StoreOp::Delete { key }),
        1 => Just(StoreOp::Flush),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, the store agrees with a plain map
    // model on membership and values, and `has` agrees with `get`.
    #[test]
    fn prop_store_matches_reference_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let runtime = Builder::new_current_thread().enable_time().build().unwrap();
        runtime.block_on(async {
            let store = MemoryStore::new();
            let mut model: HashMap<String, Value> = HashMap::new();

            for op in ops {
                match op {
                    StoreOp::Put { key, value, forever } => {
                        let expiry = if forever { Expiry::Never } else { Expiry::after_secs(3600) };
                        store.put(&key, json!(value), expiry).await.unwrap();
                        model.insert(key, json!(value));
                    }
                    StoreOp::Get { key } => {
                        let actual = store.get(&key).await.unwrap();
                        let expected = model.get(&key).cloned();
                        prop_assert_eq!(actual, expected, "get disagrees with model");

                        let has = store.has(&key).await.unwrap();
                        prop_assert_eq!(has, model.contains_key(&key), "has disagrees with get");
                    }
                    StoreOp::Delete { key } => {
                        store.delete(&key).await.unwrap();
                        model.remove(&key);
                    }
                    StoreOp::Flush => {
                        store.flush().await.unwrap();
                        model.clear();
                    }
                }
            }

            prop_assert_eq!(store.len().await, model.len(), "entry count disagrees with model");
            Ok(())
        })?;
    }

    // Overwriting a key always leaves the most recent value visible.
    #[test]
    fn prop_last_put_wins(key in key_strategy(), values in prop::collection::vec(value_strategy(), 1..8)) {
        let runtime = Builder::new_current_thread().enable_time().build().unwrap();
        runtime.block_on(async {
            let store = MemoryStore::new();

            for value in &values {
                store.put(&key, json!(value), Expiry::Never).await.unwrap();
            }

            let last = values.last().unwrap();
            prop_assert_eq!(store.get(&key).await.unwrap(), Some(json!(last)));
            prop_assert_eq!(store.len().await, 1);
            Ok(())
        })?;
    }

    // Deleting is idempotent: repeated deletes succeed and leave the
    // store unchanged.
    #[test]
    fn prop_delete_idempotent(key in key_strategy(), value in value_strategy()) {
        let runtime = Builder::new_current_thread().enable_time().build().unwrap();
        runtime.block_on(async {
            let store = MemoryStore::new();

            store.put(&key, json!(value), Expiry::Never).await.unwrap();
            store.delete(&key).await.unwrap();
            store.delete(&key).await.unwrap();

            prop_assert_eq!(store.get(&key).await.unwrap(), None);
            prop_assert_eq!(store.len().await, 0);
            Ok(())
        })?;
    }
}
