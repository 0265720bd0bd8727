//! In-process event bus
//!
//! A tokio broadcast channel shared by the store (lifecycle events), the
//! timer dispatcher (firings) and the reminder listener. Publishing never
//! blocks; a subscriber that falls behind skips what it missed.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::events::{Event, EventMessage};

const CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: Event) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let reservation_id = message.event.reservation_id();

        // Err only means nobody is listening, e.g. one-shot CLI commands
        let delivered = self.sender.send(message).unwrap_or(0);
        debug!(
            "Event {} for {} delivered to {} subscribers",
            event_type, reservation_id, delivered
        );
    }

    /// Only events published after this call are received.
    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
}

impl EventSubscriber {
    /// Next message, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Event subscriber lagged, {} events skipped", missed);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::events::{ReminderFiredEvent, ReminderSchedulingFailedEvent};
    use chrono::Utc;
    use uuid::Uuid;

    fn failed(id: Uuid) -> Event {
        Event::ReminderSchedulingFailed(ReminderSchedulingFailedEvent {
            reservation_id: id,
            reason: "dispatcher offline".to_string(),
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn subscribers_see_later_events_in_order() {
        let bus = EventBus::new();
        let early = Uuid::new_v4();
        bus.publish(failed(early));

        let mut subscriber = bus.subscribe();
        let id = Uuid::new_v4();
        bus.publish(failed(id));
        bus.publish(Event::ReminderFired(ReminderFiredEvent {
            reservation_id: id,
            scheduled_for: Utc::now(),
            fired_at: Utc::now(),
        }));

        let first = subscriber.recv().await.unwrap();
        assert_eq!(first.event.event_type(), "reminder_scheduling_failed");
        assert_eq!(first.event.reservation_id(), id);
        let second = subscriber.recv().await.unwrap();
        assert_eq!(second.event.event_type(), "reminder_fired");
    }

    #[tokio::test]
    async fn recv_ends_when_bus_is_dropped() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();
        drop(bus);
        assert!(subscriber.recv().await.is_none());
    }
}
