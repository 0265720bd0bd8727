//! Booking and extension pricing
//!
//! Pure functions. Money is `Decimal`, so fractional hours such as
//! 30 minutes price exactly and totals never drift across extensions.
//! Every operation is checked: a cost that leaves the `Decimal` range is
//! an error, never a panic.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::parking_spot::ParkingSpot;
use crate::domain::reservation::Reservation;
use crate::support::errors::{DomainError, DomainResult};

const SECONDS_PER_HOUR: i64 = 3600;

/// Cost of booking `spot` for whole `hours`.
pub fn booking_cost(spot: &ParkingSpot, hours: u32) -> DomainResult<Decimal> {
    spot.price_per_hour
        .checked_mul(Decimal::from(hours))
        .ok_or_else(|| DomainError::InvalidSpot {
            spot: spot.name.clone(),
            reason: format!(
                "cost of {} hours at {}/h is out of range",
                hours, spot.price_per_hour
            ),
        })
}

/// Cost of adding `duration` to a booking of `spot`:
/// `duration in hours × price_per_hour`.
pub fn additional_cost(spot: &ParkingSpot, duration: Duration) -> DomainResult<Decimal> {
    // Multiply before dividing so whole-minute durations stay exact.
    spot.price_per_hour
        .checked_mul(Decimal::from(duration.num_seconds()))
        .and_then(|scaled| scaled.checked_div(Decimal::from(SECONDS_PER_HOUR)))
        .ok_or_else(|| cost_out_of_range(duration))
}

/// `total + cost`, rejecting a sum outside the `Decimal` range.
pub fn accrue(total: Decimal, cost: Decimal, added: Duration) -> DomainResult<Decimal> {
    total
        .checked_add(cost)
        .ok_or_else(|| cost_out_of_range(added))
}

fn cost_out_of_range(duration: Duration) -> DomainError {
    DomainError::InvalidDuration(format!(
        "cost of {} minutes is out of range",
        duration.num_minutes()
    ))
}

/// Preview of an extension before it is applied
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionQuote {
    pub added: Duration,
    pub additional_cost: Decimal,
    pub new_end_time: DateTime<Utc>,
    pub new_total: Decimal,
}

pub fn quote_extension(reservation: &Reservation, added: Duration) -> DomainResult<ExtensionQuote> {
    let new_end_time = reservation
        .end_time
        .checked_add_signed(added)
        .ok_or_else(|| {
            DomainError::InvalidDuration(format!(
                "extension of {} minutes is out of range",
                added.num_minutes()
            ))
        })?;
    let additional_cost = additional_cost(&reservation.spot, added)?;
    Ok(ExtensionQuote {
        added,
        additional_cost,
        new_end_time,
        new_total: accrue(reservation.total_price, additional_cost, added)?,
    })
}
