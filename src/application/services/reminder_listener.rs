//! Reminder listener
//!
//! Background task that turns `ReminderFired` events into user-facing
//! notices. Each firing is checked against the store first, so stale
//! reminders left over from before an extension are dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};

use crate::notifications::{Event, SharedEventBus};
use crate::support::shutdown::ShutdownSignal;

use super::reservation_store::{ReminderNotice, ReservationStore};

pub struct ReminderListener {
    store: Arc<ReservationStore>,
    event_bus: SharedEventBus,
    running: Arc<RwLock<bool>>,
}

impl ReminderListener {
    pub fn new(store: Arc<ReservationStore>, event_bus: SharedEventBus) -> Self {
        Self {
            store,
            event_bus,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start listening; current notices are delivered on the returned
    /// channel until `shutdown` fires.
    pub fn start(&self, shutdown: ShutdownSignal) -> mpsc::UnboundedReceiver<ReminderNotice> {
        let (tx, rx) = mpsc::unbounded_channel();
        // subscribe before spawning so no firing slips past
        let mut subscriber = self.event_bus.subscribe();
        let store = self.store.clone();
        let running = self.running.clone();

        tokio::spawn(async move {
            *running.write().await = true;
            info!("Reminder listener started");

            loop {
                tokio::select! {
                    message = subscriber.recv() => {
                        let Some(message) = message else { break };
                        let Event::ReminderFired(fired) = message.event else { continue };

                        match store.resolve_reminder(fired.reservation_id).await {
                            Some(notice) => {
                                metrics::counter!("parking_reminders_fired_total").increment(1);
                                info!(
                                    "Reminder: {} at {} ends {} ({} min left)",
                                    notice.plate_number,
                                    notice.spot_name,
                                    notice.end_time,
                                    notice.remaining.num_minutes()
                                );
                                if tx.send(notice).is_err() {
                                    debug!("Notice receiver dropped");
                                }
                            }
                            None => {
                                metrics::counter!("parking_reminders_stale_total").increment(1);
                                debug!("Stale reminder for {} dropped", fired.reservation_id);
                            }
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Reminder listener shutting down");
                        break;
                    }
                }
            }

            *running.write().await = false;
            info!("Reminder listener stopped");
        });

        rx
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}
