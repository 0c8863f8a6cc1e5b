use bearcave_types::{Key, Value};
use commonware_codec::Encode;
use commonware_cryptography::{
    sha256::{Digest, Sha256},
    Hasher,
};
use commonware_runtime::{Clock, Metrics, Spawner, Storage};
use commonware_storage::{adb::any::variable::Any, translator::Translator};
use std::{collections::HashMap, future::Future};
use tracing::warn;

/// Authenticated database holding the derived entities, keyed by the hash
/// of each entity key's encoding.
pub type Adb<E, T> = Any<E, Digest, Value, Sha256, T>;

/// The entity store. Entities are only ever created and updated, never
/// deleted (removed caves merely deactivate), so the contract has no
/// delete path.
pub trait State {
    fn get(&self, key: &Key) -> impl Future<Output = Option<Value>>;
    fn insert(&mut self, key: Key, value: Value) -> impl Future<Output = ()>;

    fn apply(&mut self, changes: Vec<(Key, Value)>) -> impl Future<Output = ()> {
        async {
            for (key, value) in changes {
                self.insert(key, value).await;
            }
        }
    }
}

impl<E: Spawner + Metrics + Clock + Storage, T: Translator> State for Adb<E, T> {
    async fn get(&self, key: &Key) -> Option<Value> {
        let key = Sha256::hash(&key.encode());
        match self.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Database error during get operation: {:?}", e);
                None
            }
        }
    }

    async fn insert(&mut self, key: Key, value: Value) {
        let key = Sha256::hash(&key.encode());
        if let Err(e) = self.update(key, value).await {
            warn!("Database error during insert operation: {:?}", e);
        }
    }
}

/// In-memory store for unit tests and replay comparisons.
#[derive(Debug, Default, PartialEq)]
pub struct Memory {
    state: HashMap<Key, Value>,
}

impl State for Memory {
    async fn get(&self, key: &Key) -> Option<Value> {
        self.state.get(key).cloned()
    }

    async fn insert(&mut self, key: Key, value: Value) {
        self.state.insert(key, value);
    }
}
