//! Outbound ports: interfaces for delivering expiry reminders
//!
//! [`NotificationDispatcher`] decouples the reservation store from how a
//! reminder is actually timed and delivered. The store only says *which*
//! reservation and *when*.
//!
//! Implementations live in
//! [`infrastructure::notifications`](crate::infrastructure::notifications):
//! a tokio timer dispatcher and an in-memory recording dispatcher.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::{Reservation, ReservationId};
use crate::support::errors::SchedulingError;

pub const REMINDER_TITLE: &str = "Parking Time Expiring Soon";

/// Content attached to a scheduled reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPayload {
    pub reservation_id: ReservationId,
    pub title: String,
    pub body: String,
}

impl ReminderPayload {
    pub fn for_reservation(reservation: &Reservation, lead: Duration) -> Self {
        Self {
            reservation_id: reservation.id,
            title: REMINDER_TITLE.to_string(),
            body: format!(
                "Your parking at {} will expire in {} minutes. Do you want to extend?",
                reservation.spot.name,
                lead.num_minutes()
            ),
        }
    }
}

// ── NotificationDispatcher ─────────────────────────────────────

/// Port for registering wall-clock reminders keyed by reservation id.
///
/// At most one alert exists per id: registering again replaces the
/// previous alert, and `unregister` is a no-op when nothing is pending.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Register an alert firing at `fire_at`.
    async fn register(
        &self,
        reservation_id: ReservationId,
        fire_at: DateTime<Utc>,
        payload: ReminderPayload,
    ) -> Result<(), SchedulingError>;

    /// Remove any pending alert for `reservation_id`.
    async fn unregister(&self, reservation_id: ReservationId);
}
