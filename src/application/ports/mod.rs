//! Application ports (hexagonal architecture boundaries)
//!
//! The persistence port is the domain's `ReservationRepository`.
//! Outbound ports that depend on application-layer types live here.

pub mod outbound;

pub use crate::domain::reservation::ReservationRepository;
pub use outbound::{NotificationDispatcher, ReminderPayload, REMINDER_TITLE};
