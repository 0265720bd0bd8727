//! Parking spot domain entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::support::errors::{DomainError, DomainResult};

pub type SpotId = Uuid;

/// Kind of bay offered by a spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotType {
    Normal,
    /// Bay with an EV charger
    Ev,
}

impl SpotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ev => "ev",
        }
    }
}

impl std::fmt::Display for SpotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A bookable parking spot, as produced by a catalog or search.
///
/// Reservations keep their own copy; nothing in this crate mutates a spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Price per hour in the local currency (e.g. RM)
    pub price_per_hour: Decimal,
    /// Distance from the searcher in km, informational only
    pub distance_km: f64,
    pub spot_type: SpotType,
}

impl ParkingSpot {
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        price_per_hour: Decimal,
        distance_km: f64,
        spot_type: SpotType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinate,
            price_per_hour,
            distance_km,
            spot_type,
        }
    }

    /// Check that the spot can be booked: named and priced above zero.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidSpot {
                spot: self.id.to_string(),
                reason: "name must not be empty".to_string(),
            });
        }
        if self.price_per_hour <= Decimal::ZERO {
            return Err(DomainError::InvalidSpot {
                spot: self.name.clone(),
                reason: format!("hourly price must be positive, got {}", self.price_per_hour),
            });
        }
        Ok(())
    }

    pub fn is_ev(&self) -> bool {
        self.spot_type == SpotType::Ev
    }
}

// ── Tests ──────────────────────────────────────────────────────
