//! Notifications module
//!
//! Broadcasts reservation lifecycle events to in-process subscribers.
//!
//! # Usage
//! ```ignore
//! use parking_service::notifications::{create_event_bus, Event, ReminderFiredEvent};
//! use chrono::Utc;
//!
//! let event_bus = create_event_bus();
//! let mut subscriber = event_bus.subscribe();
//!
//! event_bus.publish(Event::ReminderFired(ReminderFiredEvent {
//!     reservation_id,
//!     scheduled_for: Utc::now(),
//!     fired_at: Utc::now(),
//! }));
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
