//! Application services

mod reminder_listener;
mod reminder_scheduler;
mod reservation_store;

pub use reminder_listener::ReminderListener;
pub use reminder_scheduler::ReminderScheduler;
pub use reservation_store::{ActiveReservations, ReminderNotice, ReservationStore};
