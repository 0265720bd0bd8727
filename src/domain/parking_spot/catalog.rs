//! Built-in sample catalog
//!
//! Stand-in for the search collaborator so the CLI can book something
//! without a real spot feed.

use rust_decimal::Decimal;

use super::model::{Coordinate, ParkingSpot, SpotType};

/// Sample spots around San Francisco's downtown.
pub fn sample_spots() -> Vec<ParkingSpot> {
    [
        ("Downtown Parking", 37.7749, -122.4194, 500, 0.5, SpotType::Normal),
        ("City Center Garage", 37.7850, -122.4100, 750, 1.2, SpotType::Ev),
        ("Harbor View Parking", 37.8000, -122.4300, 600, 2.0, SpotType::Normal),
        ("Tech Park EV Station", 37.7900, -122.4000, 800, 1.5, SpotType::Ev),
        ("Central Square Lot", 37.7700, -122.4250, 450, 0.8, SpotType::Normal),
    ]
    .into_iter()
    .map(|(name, lat, lon, cents, distance, spot_type)| {
        ParkingSpot::new(
            name,
            Coordinate::new(lat, lon),
            Decimal::new(cents, 2),
            distance,
            spot_type,
        )
    })
    .collect()
}

/// Case-insensitive lookup by spot name.
pub fn find_by_name<'a>(spots: &'a [ParkingSpot], name: &str) -> Option<&'a ParkingSpot> {
    spots.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}
