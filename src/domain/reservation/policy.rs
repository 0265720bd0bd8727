//! Reservation timing policy

use chrono::Duration;

use crate::support::errors::{DomainError, DomainResult};

/// Minutes before expiry at which the reminder fires
pub const DEFAULT_REMINDER_LEAD_MINUTES: i64 = 30;

/// Extension increments offered to the holder, in minutes
pub const DEFAULT_EXTENSION_OPTIONS_MINUTES: [i64; 4] = [30, 60, 120, 180];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationPolicy {
    /// How long before `end_time` the expiry reminder fires
    pub reminder_lead: Duration,
    /// The only durations `extend` accepts
    pub allowed_extensions: Vec<Duration>,
}

impl ReservationPolicy {
    pub fn new(reminder_lead: Duration, allowed_extensions: Vec<Duration>) -> Self {
        Self {
            reminder_lead,
            allowed_extensions,
        }
    }

    pub fn from_minutes(reminder_lead_minutes: i64, allowed_extension_minutes: &[i64]) -> Self {
        Self::new(
            Duration::minutes(reminder_lead_minutes),
            allowed_extension_minutes
                .iter()
                .copied()
                .map(Duration::minutes)
                .collect(),
        )
    }

    pub fn check_extension(&self, added: Duration) -> DomainResult<()> {
        if self.allowed_extensions.contains(&added) {
            Ok(())
        } else {
            Err(DomainError::InvalidDuration(format!(
                "{} minutes is not an allowed extension (allowed: {})",
                added.num_minutes(),
                self.allowed_extension_label()
            )))
        }
    }

    fn allowed_extension_label(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|d| d.num_minutes().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self::from_minutes(
            DEFAULT_REMINDER_LEAD_MINUTES,
            &DEFAULT_EXTENSION_OPTIONS_MINUTES,
        )
    }
}
