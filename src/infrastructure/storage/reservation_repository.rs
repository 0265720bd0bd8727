//! Key-value implementation of ReservationRepository
//!
//! The whole reservation set is stored as one JSON array under a single
//! key, in insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::KeyValueStore;
use crate::domain::{DomainResult, Reservation, ReservationRepository};
use crate::support::errors::InfraError;

/// Storage key holding the serialized reservation set
pub const RESERVATIONS_KEY: &str = "parking_reservations";

pub struct KeyValueReservationRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueReservationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, RESERVATIONS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn encode(reservations: &[Reservation]) -> Result<Vec<u8>, InfraError> {
    Ok(serde_json::to_vec(reservations)?)
}

fn decode(bytes: &[u8]) -> Result<Vec<Reservation>, InfraError> {
    Ok(serde_json::from_slice(bytes)?)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for KeyValueReservationRepository {
    async fn load(&self) -> DomainResult<Vec<Reservation>> {
        match self.store.get(&self.key).await? {
            Some(bytes) => {
                let reservations = decode(&bytes)?;
                debug!("Loaded {} reservations from '{}'", reservations.len(), self.key);
                Ok(reservations)
            }
            None => {
                debug!("No reservations stored under '{}' yet", self.key);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, reservations: &[Reservation]) -> DomainResult<()> {
        let bytes = encode(reservations)?;
        self.store.put(&self.key, bytes).await?;
        debug!("Saved {} reservations to '{}'", reservations.len(), self.key);
        Ok(())
    }
}
