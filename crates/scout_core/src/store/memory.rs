//! Process-local gateway for tests and ephemeral sessions.

use crate::store::gateway::{GatewayError, GatewayResult, PersistenceGateway};
use std::collections::HashMap;
use std::sync::Mutex;

/// Gateway backed by a map held in memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save(&self, key: &str, blob: &[u8]) -> GatewayResult<()> {
        let mut blobs = self.blobs.lock().map_err(|_| GatewayError::LockPoisoned)?;
        blobs.insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> GatewayResult<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().map_err(|_| GatewayError::LockPoisoned)?;
        Ok(blobs.get(key).cloned())
    }
}
