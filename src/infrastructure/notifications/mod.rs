//! Notification dispatcher implementations

mod recording;
mod timer;

pub use recording::{DispatchCall, RecordingDispatcher, ScheduledReminder};
pub use timer::TimerDispatcher;
