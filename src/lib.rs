//! # Parking Service
//!
//! Parking reservation core: book a spot for whole hours, extend in fixed
//! increments, persist the reservation set, and remind the holder shortly
//! before expiry.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Spots, reservations, timing policy and pricing
//! - **application**: Reservation store, reminder scheduling and listener
//! - **infrastructure**: Key-value storage backends and notification dispatchers
//! - **notifications**: In-process event bus for lifecycle events
//! - **support**: Errors, clock and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use application::{ActiveReservations, ReminderNotice, ReservationStore};
pub use domain::{
    DomainError, DomainResult, ParkingSpot, Reservation, ReservationId, ReservationPolicy,
    SpotType,
};

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
