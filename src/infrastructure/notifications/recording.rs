//! In-memory recording dispatcher
//!
//! Keeps pending reminders in a table without any timers. Used by tests
//! and dry runs to observe exactly what the scheduler asked for.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::application::ports::{NotificationDispatcher, ReminderPayload};
use crate::domain::ReservationId;
use crate::support::errors::SchedulingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub fire_at: DateTime<Utc>,
    pub payload: ReminderPayload,
}

/// A call made against the dispatcher, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchCall {
    Register {
        reservation_id: ReservationId,
        fire_at: DateTime<Utc>,
    },
    Unregister {
        reservation_id: ReservationId,
    },
}

#[derive(Default)]
pub struct RecordingDispatcher {
    pending: DashMap<ReservationId, ScheduledReminder>,
    calls: Mutex<Vec<DispatchCall>>,
    reject: AtomicBool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent registration (or accept them again).
    pub fn set_rejecting(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn pending_for(&self, reservation_id: ReservationId) -> Option<ScheduledReminder> {
        self.pending.get(&reservation_id).map(|r| r.value().clone())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn calls(&self) -> Vec<DispatchCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: DispatchCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn register(
        &self,
        reservation_id: ReservationId,
        fire_at: DateTime<Utc>,
        payload: ReminderPayload,
    ) -> Result<(), SchedulingError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(SchedulingError::Rejected {
                reservation_id: reservation_id.to_string(),
                reason: "registrations disabled".to_string(),
            });
        }
        self.record(DispatchCall::Register {
            reservation_id,
            fire_at,
        });
        self.pending
            .insert(reservation_id, ScheduledReminder { fire_at, payload });
        Ok(())
    }

    async fn unregister(&self, reservation_id: ReservationId) {
        self.record(DispatchCall::Unregister { reservation_id });
        self.pending.remove(&reservation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn payload(id: ReservationId) -> ReminderPayload {
        ReminderPayload {
            reservation_id: id,
            title: "t".into(),
            body: "b".into(),
        }
    }

    #[tokio::test]
    async fn register_replaces_and_unregister_clears() {
        let dispatcher = RecordingDispatcher::new();
        let id = Uuid::new_v4();
        let first = Utc::now();
        let second = first + chrono::Duration::minutes(60);

        dispatcher.register(id, first, payload(id)).await.unwrap();
        dispatcher.register(id, second, payload(id)).await.unwrap();
        assert_eq!(dispatcher.pending_count(), 1);
        assert_eq!(dispatcher.pending_for(id).unwrap().fire_at, second);

        dispatcher.unregister(id).await;
        assert!(dispatcher.pending_for(id).is_none());
        assert_eq!(dispatcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn rejecting_dispatcher_records_nothing() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.set_rejecting(true);
        let id = Uuid::new_v4();

        let err = dispatcher
            .register(id, Utc::now(), payload(id))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Rejected { .. }));
        assert_eq!(dispatcher.pending_count(), 0);
        assert!(dispatcher.calls().is_empty());
    }
}
