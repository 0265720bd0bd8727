//! Parking spot value type and the sample catalog.

pub mod catalog;
pub mod model;

pub use model::{Coordinate, ParkingSpot, SpotId, SpotType};
