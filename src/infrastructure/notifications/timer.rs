//! Tokio timer dispatcher
//!
//! One sleeping task per pending reminder. When a timer elapses the
//! dispatcher publishes [`Event::ReminderFired`] on the event bus; the
//! reminder listener takes it from there.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::ports::{NotificationDispatcher, ReminderPayload};
use crate::domain::ReservationId;
use crate::notifications::{Event, ReminderFiredEvent, SharedEventBus};
use crate::support::errors::SchedulingError;
use crate::support::time::SharedClock;

struct PendingTimer {
    generation: u64,
    fire_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

pub struct TimerDispatcher {
    timers: Arc<DashMap<ReservationId, PendingTimer>>,
    event_bus: SharedEventBus,
    clock: SharedClock,
    next_generation: AtomicU64,
    closed: AtomicBool,
}

impl TimerDispatcher {
    pub fn new(event_bus: SharedEventBus, clock: SharedClock) -> Self {
        Self {
            timers: Arc::new(DashMap::new()),
            event_bus,
            clock,
            next_generation: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Pending reminders as `(reservation id, fire time)`
    pub fn pending(&self) -> Vec<(ReservationId, DateTime<Utc>)> {
        self.timers
            .iter()
            .map(|t| (*t.key(), t.value().fire_at))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Abort every pending timer and refuse new registrations.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let ids: Vec<ReservationId> = self.timers.iter().map(|t| *t.key()).collect();
        for id in &ids {
            if let Some((_, timer)) = self.timers.remove(id) {
                timer.handle.abort();
            }
        }
        info!("Timer dispatcher closed, {} pending reminders dropped", ids.len());
    }
}

#[async_trait]
impl NotificationDispatcher for TimerDispatcher {
    async fn register(
        &self,
        reservation_id: ReservationId,
        fire_at: DateTime<Utc>,
        payload: ReminderPayload,
    ) -> Result<(), SchedulingError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SchedulingError::Unavailable(
                "timer dispatcher is shut down".to_string(),
            ));
        }

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        // Negative delays (instant already passed) fire right away.
        let delay = (fire_at - self.clock.now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        // The shard stays locked until the new timer is stored, so a timer
        // that fires immediately cannot race its own insertion.
        let entry = self.timers.entry(reservation_id);
        let timers = self.timers.clone();
        let event_bus = self.event_bus.clone();
        let clock = self.clock.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if timers
                .remove_if(&reservation_id, |_, t| t.generation == generation)
                .is_none()
            {
                return;
            }
            debug!("Reminder fired for reservation {}: {}", reservation_id, payload.title);
            event_bus.publish(Event::ReminderFired(ReminderFiredEvent {
                reservation_id,
                scheduled_for: fire_at,
                fired_at: clock.now(),
            }));
        });

        let timer = PendingTimer {
            generation,
            fire_at,
            handle,
        };
        match entry {
            Entry::Occupied(mut occupied) => {
                let previous = occupied.insert(timer);
                previous.handle.abort();
            }
            Entry::Vacant(vacant) => {
                vacant.insert(timer);
            }
        }

        debug!(
            "Reminder registered for reservation {} at {} (in {:?})",
            reservation_id, fire_at, delay
        );
        Ok(())
    }

    async fn unregister(&self, reservation_id: ReservationId) {
        if let Some((_, timer)) = self.timers.remove(&reservation_id) {
            timer.handle.abort();
            debug!("Reminder cancelled for reservation {}", reservation_id);
        }
    }
}

impl Drop for TimerDispatcher {
    fn drop(&mut self) {
        for timer in self.timers.iter() {
            timer.value().handle.abort();
        }
    }
}
