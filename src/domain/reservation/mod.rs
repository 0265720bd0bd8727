//! Reservation aggregate
//!
//! Contains the Reservation entity, its timing policy, and the repository interface.

pub mod model;
pub mod policy;
pub mod repository;

pub use model::{ExtensionRecord, Reservation, ReservationId};
pub use policy::{
    ReservationPolicy, DEFAULT_EXTENSION_OPTIONS_MINUTES, DEFAULT_REMINDER_LEAD_MINUTES,
};
pub use repository::ReservationRepository;
