//! Reservation domain entity

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::parking_spot::ParkingSpot;
use crate::domain::services::pricing;
use crate::support::errors::{DomainError, DomainResult};

pub type ReservationId = Uuid;

/// One applied extension, kept so the accrued total can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Added time in minutes
    pub added_minutes: i64,
    /// Cost charged for the added time
    pub cost: Decimal,
    pub applied_at: DateTime<Utc>,
}

impl ExtensionRecord {
    pub fn added(&self) -> Duration {
        Duration::minutes(self.added_minutes)
    }
}

/// Booking of a parking spot for a bounded time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: ReservationId,
    /// Snapshot of the spot at booking time
    pub spot: ParkingSpot,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Whole hours booked at creation
    pub booked_hours: u32,
    pub plate_number: String,
    pub holder_name: String,
    /// Booked cost plus every extension cost
    pub total_price: Decimal,
    #[serde(default)]
    pub extensions: Vec<ExtensionRecord>,
}

impl Reservation {
    /// Book `spot` for `hours` whole hours starting at `now`.
    pub fn book(
        spot: &ParkingSpot,
        hours: i64,
        plate_number: impl Into<String>,
        holder_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let booked_hours = u32::try_from(hours)
            .ok()
            .filter(|h| *h > 0)
            .ok_or_else(|| {
                DomainError::InvalidDuration(format!(
                    "booking must be a positive number of hours, got {}",
                    hours
                ))
            })?;
        spot.validate()?;
        let end_time = now
            .checked_add_signed(Duration::hours(hours))
            .ok_or_else(|| DomainError::InvalidDuration(format!("{} hours is out of range", hours)))?;

        let total_price = pricing::booking_cost(spot, booked_hours)?;

        Ok(Self {
            id: Uuid::new_v4(),
            spot: spot.clone(),
            start_time: now,
            end_time,
            booked_hours,
            plate_number: plate_number.into(),
            holder_name: holder_name.into(),
            total_price,
            extensions: Vec::new(),
        })
    }

    /// Push the end time forward by `added` and accrue its cost.
    pub fn apply_extension(&mut self, added: Duration, now: DateTime<Utc>) -> DomainResult<()> {
        if added <= Duration::zero() {
            return Err(DomainError::InvalidDuration(format!(
                "extension must be positive, got {} minutes",
                added.num_minutes()
            )));
        }
        let end_time = self.end_time.checked_add_signed(added).ok_or_else(|| {
            DomainError::InvalidDuration(format!(
                "extension of {} minutes is out of range",
                added.num_minutes()
            ))
        })?;
        let cost = pricing::additional_cost(&self.spot, added)?;
        let total_price = pricing::accrue(self.total_price, cost, added)?;
        self.end_time = end_time;
        self.total_price = total_price;
        self.extensions.push(ExtensionRecord {
            added_minutes: added.num_minutes(),
            cost,
            applied_at: now,
        });
        Ok(())
    }

    /// Active while the end time is still ahead of `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.end_time
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.end_time - now).max(Duration::zero())
    }

    /// Total extended time across all extensions
    pub fn extended_by(&self) -> Duration {
        self.extensions
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.added())
    }

    /// Booked cost plus the recorded extension costs; equals `total_price`
    /// for any reservation built through `book` and `apply_extension`.
    pub fn expected_total(&self) -> DomainResult<Decimal> {
        self.extensions
            .iter()
            .try_fold(pricing::booking_cost(&self.spot, self.booked_hours)?, |acc, e| {
                pricing::accrue(acc, e.cost, e.added())
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────
