//! Reservation repository interface

use async_trait::async_trait;

use super::model::Reservation;
use crate::support::errors::DomainResult;

/// Durable storage for the full, ordered reservation set.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Load every persisted reservation in insertion order.
    /// A store that was never written yields an empty list.
    async fn load(&self) -> DomainResult<Vec<Reservation>>;

    /// Replace the persisted set with `reservations`.
    async fn save(&self, reservations: &[Reservation]) -> DomainResult<()>;
}
