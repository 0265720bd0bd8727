pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use ports::{NotificationDispatcher, ReminderPayload, ReservationRepository, REMINDER_TITLE};
pub use services::{
    ActiveReservations, ReminderListener, ReminderNotice, ReminderScheduler, ReservationStore,
};
