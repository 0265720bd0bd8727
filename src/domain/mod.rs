pub mod parking_spot;
pub mod reservation;
pub mod services;

// Re-export commonly used types
pub use parking_spot::{Coordinate, ParkingSpot, SpotId, SpotType};
pub use reservation::{
    ExtensionRecord, Reservation, ReservationId, ReservationPolicy, ReservationRepository,
};
pub use services::ExtensionQuote;

// Re-export errors from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
