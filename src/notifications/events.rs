//! Notification events
//!
//! Reservation lifecycle events broadcast on the event bus.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Reservation created
    ReservationCreated(ReservationCreatedEvent),
    /// Reservation end time pushed forward
    ReservationExtended(ReservationExtendedEvent),
    /// A reminder timer elapsed
    ReminderFired(ReminderFiredEvent),
    /// The dispatcher refused a reminder
    ReminderSchedulingFailed(ReminderSchedulingFailedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationCreated(_) => "reservation_created",
            Event::ReservationExtended(_) => "reservation_extended",
            Event::ReminderFired(_) => "reminder_fired",
            Event::ReminderSchedulingFailed(_) => "reminder_scheduling_failed",
        }
    }

    pub fn reservation_id(&self) -> Uuid {
        match self {
            Event::ReservationCreated(e) => e.reservation_id,
            Event::ReservationExtended(e) => e.reservation_id,
            Event::ReminderFired(e) => e.reservation_id,
            Event::ReminderSchedulingFailed(e) => e.reservation_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreatedEvent {
    pub reservation_id: Uuid,
    pub spot_name: String,
    pub end_time: DateTime<Utc>,
    pub total_price: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationExtendedEvent {
    pub reservation_id: Uuid,
    pub added_minutes: i64,
    pub additional_cost: Decimal,
    pub new_end_time: DateTime<Utc>,
    pub new_total: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Raw timer firing. Carries what was captured at scheduling time, which
/// may be stale; consumers re-read the reservation by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderFiredEvent {
    pub reservation_id: Uuid,
    pub scheduled_for: DateTime<Utc>,
    pub fired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSchedulingFailedEvent {
    pub reservation_id: Uuid,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Event message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    /// Unique message ID
    pub id: String,
    #[serde(flatten)]
    pub event: Event,
    pub published_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event,
            published_at: Utc::now(),
        }
    }
}
