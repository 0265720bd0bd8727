//! Reservation store
//!
//! Single owner of the reservation table. Every mutation runs under one
//! write lock that also covers the persistence write and the reminder
//! cancel-then-register pair, so memory, durable state and pending
//! reminders never disagree about a reservation's end time.
//!
//! Failure handling is asymmetric: a failed persistence write rolls the
//! in-memory change back and is returned to the caller, while a dispatcher
//! rejection is logged and published but leaves the committed reservation
//! in place.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::ports::{NotificationDispatcher, ReservationRepository};
use crate::domain::services::pricing::{self, ExtensionQuote};
use crate::domain::{
    DomainError, DomainResult, ParkingSpot, Reservation, ReservationId, ReservationPolicy,
};
use crate::notifications::{
    Event, ReminderSchedulingFailedEvent, ReservationCreatedEvent, ReservationExtendedEvent,
    SharedEventBus,
};
use crate::support::errors::SchedulingError;
use crate::support::time::SharedClock;

use super::reminder_scheduler::ReminderScheduler;

// ── Table ──────────────────────────────────────────────────────

/// Reservations in insertion order with an id index
#[derive(Default)]
struct ReservationTable {
    entries: Vec<Reservation>,
    index: HashMap<ReservationId, usize>,
}

impl ReservationTable {
    fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    fn get_mut(&mut self, id: &ReservationId) -> Option<&mut Reservation> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    /// Append; returns false when the id is already present.
    fn push(&mut self, reservation: Reservation) -> bool {
        if self.index.contains_key(&reservation.id) {
            return false;
        }
        self.index.insert(reservation.id, self.entries.len());
        self.entries.push(reservation);
        true
    }

    /// Undo the most recent `push`.
    fn pop(&mut self) -> Option<Reservation> {
        let last = self.entries.pop()?;
        self.index.remove(&last.id);
        Some(last)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ── Snapshot ───────────────────────────────────────────────────

/// Point-in-time copy of the table, filtered to reservations active at
/// `as_of`. Iterating is lazy and can be repeated.
#[derive(Debug, Clone)]
pub struct ActiveReservations {
    snapshot: Vec<Reservation>,
    as_of: DateTime<Utc>,
}

impl ActiveReservations {
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> + '_ {
        let as_of = self.as_of;
        self.snapshot.iter().filter(move |r| r.is_active(as_of))
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<Reservation> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a ActiveReservations {
    type Item = &'a Reservation;
    type IntoIter = Box<dyn Iterator<Item = &'a Reservation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// What the holder should be told when a reminder is still current
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderNotice {
    pub reservation_id: ReservationId,
    pub spot_name: String,
    pub plate_number: String,
    pub end_time: DateTime<Utc>,
    pub remaining: Duration,
    pub title: String,
    pub body: String,
}

// ── Store ──────────────────────────────────────────────────────

pub struct ReservationStore {
    table: RwLock<ReservationTable>,
    repository: Arc<dyn ReservationRepository>,
    scheduler: ReminderScheduler,
    event_bus: SharedEventBus,
    policy: ReservationPolicy,
    clock: SharedClock,
}

impl ReservationStore {
    /// Restore persisted reservations and re-register reminders for the
    /// ones still active. An empty or never-written store is a fresh start.
    pub async fn open(
        repository: Arc<dyn ReservationRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        event_bus: SharedEventBus,
        policy: ReservationPolicy,
        clock: SharedClock,
    ) -> DomainResult<Self> {
        let scheduler = ReminderScheduler::new(dispatcher, clock.clone(), policy.reminder_lead);
        let store = Self {
            table: RwLock::new(ReservationTable::default()),
            repository,
            scheduler,
            event_bus,
            policy,
            clock,
        };
        store.restore().await?;
        Ok(store)
    }

    async fn restore(&self) -> DomainResult<()> {
        let loaded = self.repository.load().await?;
        let mut table = self.table.write().await;

        for reservation in loaded {
            let id = reservation.id;
            if !table.push(reservation) {
                warn!("Skipping duplicate persisted reservation {}", id);
            }
        }

        let now = self.clock.now();
        let mut rescheduled = 0;
        for reservation in table.entries.iter().filter(|r| r.is_active(now)) {
            match self.scheduler.schedule(reservation).await {
                Ok(Some(_)) => rescheduled += 1,
                Ok(None) => {}
                Err(e) => self.report_scheduling_failure(reservation.id, &e),
            }
        }

        info!(
            "Restored {} reservations, {} reminders rescheduled",
            table.len(),
            rescheduled
        );
        Ok(())
    }

    pub fn policy(&self) -> &ReservationPolicy {
        &self.policy
    }

    /// Book `spot` for `hours` whole hours starting now.
    pub async fn create(
        &self,
        spot: &ParkingSpot,
        hours: i64,
        plate_number: &str,
        holder_name: &str,
    ) -> DomainResult<Reservation> {
        let now = self.clock.now();
        let reservation = Reservation::book(spot, hours, plate_number, holder_name, now)?;

        let mut table = self.table.write().await;
        if !table.push(reservation.clone()) {
            // v4 collision; nothing was inserted
            return Err(DomainError::InvalidSpot {
                spot: spot.name.clone(),
                reason: format!("reservation id {} already exists", reservation.id),
            });
        }

        if let Err(e) = self.repository.save(&table.entries).await {
            table.pop();
            warn!("Create rolled back, persistence failed: {}", e);
            return Err(e);
        }

        if let Err(e) = self.scheduler.schedule(&reservation).await {
            self.report_scheduling_failure(reservation.id, &e);
        }
        drop(table);

        metrics::counter!("parking_reservations_created_total").increment(1);
        info!(
            "Reservation {} created: {} for {}h, plate {}, total {}",
            reservation.id, reservation.spot.name, hours, reservation.plate_number, reservation.total_price
        );
        self.event_bus
            .publish(Event::ReservationCreated(ReservationCreatedEvent {
                reservation_id: reservation.id,
                spot_name: reservation.spot.name.clone(),
                end_time: reservation.end_time,
                total_price: reservation.total_price,
                timestamp: now,
            }));

        Ok(reservation)
    }

    /// Push the end time of `id` forward by one of the allowed increments.
    pub async fn extend(&self, id: ReservationId, added: Duration) -> DomainResult<Reservation> {
        let mut table = self.table.write().await;
        let now = self.clock.now();

        let reservation = table
            .get_mut(&id)
            .ok_or_else(|| DomainError::reservation_not_found(id))?;
        self.policy.check_extension(added)?;

        let previous = reservation.clone();
        reservation.apply_extension(added, now)?;
        let updated = reservation.clone();

        if let Err(e) = self.repository.save(&table.entries).await {
            if let Some(slot) = table.get_mut(&id) {
                *slot = previous;
            }
            warn!("Extension of {} rolled back, persistence failed: {}", id, e);
            return Err(e);
        }

        if let Err(e) = self.scheduler.schedule(&updated).await {
            self.report_scheduling_failure(id, &e);
        }
        drop(table);

        let additional_cost = updated.total_price - previous.total_price;
        metrics::counter!("parking_reservations_extended_total").increment(1);
        info!(
            "Reservation {} extended by {} min: ends {}, total {}",
            id,
            added.num_minutes(),
            updated.end_time,
            updated.total_price
        );
        self.event_bus
            .publish(Event::ReservationExtended(ReservationExtendedEvent {
                reservation_id: id,
                added_minutes: added.num_minutes(),
                additional_cost,
                new_end_time: updated.end_time,
                new_total: updated.total_price,
                timestamp: now,
            }));

        Ok(updated)
    }

    /// Price and end time an extension would produce, without applying it.
    pub async fn quote_extension(
        &self,
        id: ReservationId,
        added: Duration,
    ) -> DomainResult<ExtensionQuote> {
        let table = self.table.read().await;
        let reservation = table
            .get(&id)
            .ok_or_else(|| DomainError::reservation_not_found(id))?;
        self.policy.check_extension(added)?;
        pricing::quote_extension(reservation, added)
    }

    pub async fn get(&self, id: ReservationId) -> DomainResult<Reservation> {
        self.table
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::reservation_not_found(id))
    }

    /// Reservations active right now, in insertion order.
    pub async fn list_active(&self) -> ActiveReservations {
        let table = self.table.read().await;
        ActiveReservations {
            snapshot: table.entries.clone(),
            as_of: self.clock.now(),
        }
    }

    /// Every reservation ever made, expired ones included.
    pub async fn list_all(&self) -> Vec<Reservation> {
        self.table.read().await.entries.clone()
    }

    /// Decide what a fired reminder means now. Payloads captured at
    /// scheduling time may be stale, so the current reservation is the
    /// only source of truth: a reminder for an expired, unknown or
    /// since-extended reservation yields nothing.
    pub async fn resolve_reminder(&self, id: ReservationId) -> Option<ReminderNotice> {
        let table = self.table.read().await;
        let now = self.clock.now();

        let Some(reservation) = table.get(&id) else {
            debug!("Reminder for unknown reservation {} ignored", id);
            return None;
        };
        let due_at = self.scheduler.reminder_instant(reservation, now)?;
        if reservation.end_time - self.scheduler.lead() > now {
            debug!(
                "Reminder for {} superseded, next due at {}",
                id,
                reservation.end_time - self.scheduler.lead()
            );
            return None;
        }
        debug!("Reminder for {} is current (due {})", id, due_at);

        let remaining = reservation.remaining(now);
        Some(ReminderNotice {
            reservation_id: id,
            spot_name: reservation.spot.name.clone(),
            plate_number: reservation.plate_number.clone(),
            end_time: reservation.end_time,
            remaining,
            title: crate::application::ports::REMINDER_TITLE.to_string(),
            body: format!(
                "Your parking at {} will expire in {} minutes. Do you want to extend?",
                reservation.spot.name,
                remaining.num_minutes()
            ),
        })
    }

    /// Write the current table to durable storage.
    pub async fn flush(&self) -> DomainResult<()> {
        let table = self.table.read().await;
        self.repository.save(&table.entries).await?;
        info!("Flushed {} reservations", table.len());
        Ok(())
    }

    fn report_scheduling_failure(&self, id: ReservationId, error: &SchedulingError) {
        warn!("Reminder for reservation {} not scheduled: {}", id, error);
        metrics::counter!("parking_reminders_failed_total").increment(1);
        self.event_bus
            .publish(Event::ReminderSchedulingFailed(ReminderSchedulingFailedEvent {
                reservation_id: id,
                reason: error.to_string(),
                timestamp: self.clock.now(),
            }));
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, SpotType};
    use crate::infrastructure::notifications::{DispatchCall, RecordingDispatcher};
    use crate::infrastructure::storage::{InMemoryKeyValueStore, KeyValueReservationRepository};
    use crate::notifications::create_event_bus;
    use crate::support::time::{Clock, ManualClock};
    use rust_decimal::Decimal;

    struct Fixture {
        clock: ManualClock,
        kv: Arc<InMemoryKeyValueStore>,
        dispatcher: Arc<RecordingDispatcher>,
        event_bus: SharedEventBus,
        store: Arc<ReservationStore>,
    }

    impl Fixture {
        async fn new() -> Self {
            Self::with_kv(Arc::new(InMemoryKeyValueStore::new()), ManualClock::default()).await
        }

        async fn with_kv(kv: Arc<InMemoryKeyValueStore>, clock: ManualClock) -> Self {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            let event_bus = create_event_bus();
            let store = ReservationStore::open(
                Arc::new(KeyValueReservationRepository::new(kv.clone())),
                dispatcher.clone(),
                event_bus.clone(),
                ReservationPolicy::default(),
                Arc::new(clock.clone()),
            )
            .await
            .unwrap();
            Self {
                clock,
                kv,
                dispatcher,
                event_bus,
                store: Arc::new(store),
            }
        }
    }

    fn spot(cents: i64) -> ParkingSpot {
        ParkingSpot::new(
            "Downtown Parking",
            Coordinate::new(37.7749, -122.4194),
            Decimal::new(cents, 2),
            0.5,
            SpotType::Normal,
        )
    }

    fn rm(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[tokio::test]
    async fn create_then_extend_moves_price_end_and_reminder() {
        let f = Fixture::new().await;
        let now = f.clock.now();

        let r = f.store.create(&spot(500), 2, "WXY 1234", "Aina").await.unwrap();
        assert_eq!(r.total_price, rm(1000));
        assert_eq!(r.start_time, now);
        assert_eq!(r.end_time, now + Duration::hours(2));
        assert_eq!(
            f.dispatcher.pending_for(r.id).unwrap().fire_at,
            now + Duration::minutes(90)
        );

        let extended = f.store.extend(r.id, Duration::minutes(60)).await.unwrap();
        assert_eq!(extended.total_price, rm(1500));
        assert_eq!(extended.end_time, now + Duration::minutes(180));
        assert_eq!(f.dispatcher.pending_count(), 1);
        assert_eq!(
            f.dispatcher.pending_for(r.id).unwrap().fire_at,
            now + Duration::minutes(150)
        );

        // the 90-minute reminder was cancelled before the new one was set
        let calls = f.dispatcher.calls();
        let n = calls.len();
        assert_eq!(calls[n - 2], DispatchCall::Unregister { reservation_id: r.id });
        assert_eq!(
            calls[n - 1],
            DispatchCall::Register {
                reservation_id: r.id,
                fire_at: now + Duration::minutes(150)
            }
        );
    }

    #[tokio::test]
    async fn create_persists_full_set() {
        let f = Fixture::new().await;
        let a = f.store.create(&spot(500), 1, "A 1", "Ali").await.unwrap();
        let b = f.store.create(&spot(750), 3, "B 2", "Bala").await.unwrap();
        assert_eq!(f.kv.write_count(), 2);

        let repo = KeyValueReservationRepository::new(f.kv.clone());
        assert_eq!(repo.load().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn zero_hours_has_no_side_effects() {
        let f = Fixture::new().await;
        let err = f.store.create(&spot(500), 0, "P", "N").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidDuration(_)));
        assert!(f.store.list_all().await.is_empty());
        assert_eq!(f.kv.write_count(), 0);
        assert!(f.dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn unpriced_spot_is_rejected() {
        let f = Fixture::new().await;
        let err = f.store.create(&spot(0), 2, "P", "N").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_spot");
        assert!(f.store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn extension_cost_overflow_is_rejected_without_side_effects() {
        let f = Fixture::new().await;
        let mut huge = spot(500);
        huge.price_per_hour = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        let r = f.store.create(&huge, 1, "P", "N").await.unwrap();
        let writes = f.kv.write_count();
        let reminder = f.dispatcher.pending_for(r.id);

        let err = f.store.extend(r.id, Duration::minutes(180)).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_duration");
        assert_eq!(f.store.get(r.id).await.unwrap(), r);
        assert_eq!(f.kv.write_count(), writes);
        assert_eq!(f.dispatcher.pending_for(r.id), reminder);
    }

    #[tokio::test]
    async fn extend_unknown_id_changes_nothing() {
        let f = Fixture::new().await;
        let r = f.store.create(&spot(500), 2, "P", "N").await.unwrap();
        let writes = f.kv.write_count();
        let calls = f.dispatcher.calls();

        let err = f
            .store
            .extend(uuid::Uuid::new_v4(), Duration::minutes(60))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(f.kv.write_count(), writes);
        assert_eq!(f.dispatcher.calls(), calls);
        assert_eq!(f.store.get(r.id).await.unwrap(), r);
    }

    #[tokio::test]
    async fn disallowed_increment_is_rejected() {
        let f = Fixture::new().await;
        let r = f.store.create(&spot(500), 1, "P", "N").await.unwrap();

        for minutes in [0, 45, -30, 240] {
            let err = f
                .store
                .extend(r.id, Duration::minutes(minutes))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), "invalid_duration");
        }
        assert_eq!(f.store.get(r.id).await.unwrap(), r);
    }

    #[tokio::test]
    async fn extension_costs_add_up_in_any_order() {
        let f = Fixture::new().await;
        let a = f.store.create(&spot(750), 1, "A", "N").await.unwrap();
        let b = f.store.create(&spot(750), 1, "B", "N").await.unwrap();

        for minutes in [30, 180, 60, 120] {
            f.store.extend(a.id, Duration::minutes(minutes)).await.unwrap();
        }
        for minutes in [120, 60, 180, 30] {
            f.store.extend(b.id, Duration::minutes(minutes)).await.unwrap();
        }

        let a = f.store.get(a.id).await.unwrap();
        let b = f.store.get(b.id).await.unwrap();
        // 1h + 6.5h at RM 7.50
        assert_eq!(a.total_price, rm(5625));
        assert_eq!(a.total_price, b.total_price);
        assert_eq!(a.end_time - a.start_time, Duration::minutes(450));
        assert_eq!(a.total_price, a.expected_total().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_extensions_are_all_counted() {
        let f = Fixture::new().await;
        let r = f.store.create(&spot(500), 1, "P", "N").await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = f.store.clone();
                let minutes = if i % 2 == 0 { 30 } else { 60 };
                tokio::spawn(async move { store.extend(r.id, Duration::minutes(minutes)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let r = f.store.get(r.id).await.unwrap();
        // 10 × 30min + 10 × 60min = 15h on top of the booked hour
        assert_eq!(r.extensions.len(), 20);
        assert_eq!(r.end_time - r.start_time, Duration::hours(16));
        assert_eq!(r.total_price, rm(8000));
        assert_eq!(f.dispatcher.pending_count(), 1);
        assert_eq!(
            f.dispatcher.pending_for(r.id).unwrap().fire_at,
            r.end_time - Duration::minutes(30)
        );
    }

    #[tokio::test]
    async fn failed_persistence_rolls_back_create() {
        let f = Fixture::new().await;
        f.kv.set_fail_writes(true);

        let err = f.store.create(&spot(500), 2, "P", "N").await.unwrap_err();
        assert_eq!(err.kind(), "io");
        assert!(f.store.list_all().await.is_empty());
        assert_eq!(f.dispatcher.pending_count(), 0);
    }

    #[tokio::test]
    async fn failed_persistence_rolls_back_extend() {
        let f = Fixture::new().await;
        let now = f.clock.now();
        let r = f.store.create(&spot(500), 2, "P", "N").await.unwrap();
        f.kv.set_fail_writes(true);

        let err = f.store.extend(r.id, Duration::minutes(60)).await.unwrap_err();
        assert_eq!(err.kind(), "io");
        assert_eq!(f.store.get(r.id).await.unwrap(), r);
        assert_eq!(
            f.dispatcher.pending_for(r.id).unwrap().fire_at,
            now + Duration::minutes(90)
        );
    }

    #[tokio::test]
    async fn scheduling_failure_keeps_the_reservation() {
        let f = Fixture::new().await;
        let mut events = f.event_bus.subscribe();
        f.dispatcher.set_rejecting(true);

        let r = f.store.create(&spot(500), 2, "P", "N").await.unwrap();
        assert_eq!(f.store.get(r.id).await.unwrap(), r);
        assert_eq!(f.kv.write_count(), 1);

        let first = events.recv().await.unwrap();
        assert_eq!(first.event.event_type(), "reminder_scheduling_failed");
        let second = events.recv().await.unwrap();
        assert_eq!(second.event.event_type(), "reservation_created");
    }

    #[tokio::test]
    async fn list_active_filters_by_current_time() {
        let f = Fixture::new().await;
        let short = f.store.create(&spot(500), 1, "S", "N").await.unwrap();
        let long = f.store.create(&spot(500), 3, "L", "N").await.unwrap();

        let active = f.store.list_active().await;
        assert_eq!(active.len(), 2);

        f.clock.advance(Duration::minutes(61));
        let active = f.store.list_active().await;
        let ids: Vec<_> = active.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![long.id]);
        // restartable
        assert_eq!(active.iter().count(), 1);
        assert_eq!((&active).into_iter().count(), 1);

        // history keeps the expired one
        let all: Vec<_> = f.store.list_all().await.into_iter().map(|r| r.id).collect();
        assert_eq!(all, vec![short.id, long.id]);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let f = Fixture::new().await;
        let err = f.store.get(uuid::Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn quote_does_not_mutate() {
        let f = Fixture::new().await;
        let r = f.store.create(&spot(500), 2, "P", "N").await.unwrap();

        let quote = f.store.quote_extension(r.id, Duration::minutes(30)).await.unwrap();
        assert_eq!(quote.additional_cost, rm(250));
        assert_eq!(quote.new_total, rm(1250));
        assert_eq!(quote.new_end_time, r.end_time + Duration::minutes(30));
        assert_eq!(f.store.get(r.id).await.unwrap(), r);

        assert!(f.store.quote_extension(r.id, Duration::minutes(10)).await.is_err());
    }

    #[tokio::test]
    async fn reopen_restores_and_reschedules_active_only() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let clock = ManualClock::default();
        let start = clock.now();

        let (expired, active) = {
            let f = Fixture::with_kv(kv.clone(), clock.clone()).await;
            let expired = f.store.create(&spot(500), 1, "E", "N").await.unwrap();
            let active = f.store.create(&spot(500), 4, "A", "N").await.unwrap();
            (expired, active)
        };

        clock.advance(Duration::hours(2));
        let f = Fixture::with_kv(kv, clock).await;

        assert_eq!(f.store.list_all().await, vec![expired.clone(), active.clone()]);
        assert!(f.dispatcher.pending_for(expired.id).is_none());
        assert_eq!(
            f.dispatcher.pending_for(active.id).unwrap().fire_at,
            start + Duration::minutes(210)
        );
    }

    #[tokio::test]
    async fn reminder_resolution_rereads_current_state() {
        let f = Fixture::new().await;
        let r = f.store.create(&spot(500), 2, "WXY 1234", "Aina").await.unwrap();

        // before the lead instant nothing is due
        assert!(f.store.resolve_reminder(r.id).await.is_none());

        f.clock.advance(Duration::minutes(90));
        let notice = f.store.resolve_reminder(r.id).await.unwrap();
        assert_eq!(notice.remaining, Duration::minutes(30));
        assert_eq!(notice.plate_number, "WXY 1234");
        assert!(notice.body.contains("Downtown Parking"));

        // a firing captured before the extension is now stale
        f.store.extend(r.id, Duration::minutes(60)).await.unwrap();
        assert!(f.store.resolve_reminder(r.id).await.is_none());

        f.clock.advance(Duration::minutes(200));
        assert!(f.store.resolve_reminder(r.id).await.is_none());
        assert!(f.store.resolve_reminder(uuid::Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn flush_writes_current_table() {
        let f = Fixture::new().await;
        f.store.create(&spot(500), 1, "P", "N").await.unwrap();
        let writes = f.kv.write_count();
        f.store.flush().await.unwrap();
        assert_eq!(f.kv.write_count(), writes + 1);
    }
}
