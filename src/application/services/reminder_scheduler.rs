//! Reminder scheduling
//!
//! Keeps the dispatcher's pending alerts in line with reservation end
//! times: one alert per active reservation at `end_time - lead`, none for
//! expired ones. When the lead instant has already passed but the
//! reservation is still active, the alert is registered for "now" so it
//! fires immediately instead of being dropped.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::application::ports::{NotificationDispatcher, ReminderPayload};
use crate::domain::{Reservation, ReservationId};
use crate::support::errors::SchedulingError;
use crate::support::time::SharedClock;

pub struct ReminderScheduler {
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: SharedClock,
    lead: Duration,
}

impl ReminderScheduler {
    pub fn new(dispatcher: Arc<dyn NotificationDispatcher>, clock: SharedClock, lead: Duration) -> Self {
        Self {
            dispatcher,
            clock,
            lead,
        }
    }

    pub fn lead(&self) -> Duration {
        self.lead
    }

    /// When the reminder for `reservation` should fire as seen from `now`,
    /// or `None` once the reservation is no longer active.
    pub fn reminder_instant(&self, reservation: &Reservation, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !reservation.is_active(now) {
            return None;
        }
        Some((reservation.end_time - self.lead).max(now))
    }

    /// Cancel any alert for the reservation, then register a fresh one.
    /// Returns the instant registered, `None` when nothing was due.
    pub async fn schedule(
        &self,
        reservation: &Reservation,
    ) -> Result<Option<DateTime<Utc>>, SchedulingError> {
        self.dispatcher.unregister(reservation.id).await;

        let Some(fire_at) = self.reminder_instant(reservation, self.clock.now()) else {
            debug!("Reservation {} is inactive, no reminder scheduled", reservation.id);
            return Ok(None);
        };

        let payload = ReminderPayload::for_reservation(reservation, self.lead);
        self.dispatcher
            .register(reservation.id, fire_at, payload)
            .await?;
        metrics::counter!("parking_reminders_scheduled_total").increment(1);

        debug!("Reminder for reservation {} scheduled at {}", reservation.id, fire_at);
        Ok(Some(fire_at))
    }

    pub async fn cancel(&self, reservation_id: ReservationId) {
        self.dispatcher.unregister(reservation_id).await;
    }
}
