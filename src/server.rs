//! Reusable parking service runtime.
//!
//! Provides [`ServiceHandle`] that encapsulates the service lifecycle:
//! storage selection, store restore, timer-backed reminders, the reminder
//! listener, and graceful shutdown with a final flush.
//!
//! The CLI uses this for the long-running `run` command and, with the
//! listener left idle, for one-shot reservation commands.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::application::services::{ReminderListener, ReminderNotice, ReservationStore};
use crate::config::{AppConfig, StorageBackend};
use crate::domain::DomainResult;
use crate::infrastructure::notifications::TimerDispatcher;
use crate::infrastructure::storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueReservationRepository, KeyValueStore,
};
use crate::notifications::{create_event_bus, SharedEventBus};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::support::time::{SharedClock, SystemClock};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the parking service.
pub struct ServiceOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Wall-clock source (default: system clock).
    pub clock: SharedClock,
    /// Start the reminder listener (default: true).
    pub listen_for_reminders: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            clock: Arc::new(SystemClock),
            listen_for_reminders: true,
        }
    }
}

// ── ServiceHandle ──────────────────────────────────────────────────

/// Handle to a running parking service.
///
/// # Examples
///
/// ```rust,no_run
/// use parking_service::server::{ServiceHandle, ServiceOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut handle = ServiceHandle::start(ServiceOptions::default()).await?;
///     let mut notices = handle.take_notices().expect("listener running");
///     while let Some(notice) = notices.recv().await {
///         println!("{}: {}", notice.title, notice.body);
///     }
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServiceHandle {
    /// Shared event bus carrying reservation lifecycle events.
    pub event_bus: SharedEventBus,
    /// The configuration the service was started with.
    pub config: AppConfig,

    store: Arc<ReservationStore>,
    dispatcher: Arc<TimerDispatcher>,
    listener: Option<ReminderListener>,
    notices: Option<mpsc::UnboundedReceiver<ReminderNotice>>,
    shutdown: ShutdownCoordinator,
}

impl ServiceHandle {
    /// Start the parking service with the given options.
    ///
    /// This will:
    /// 1. Open the configured storage backend
    /// 2. Restore persisted reservations and reschedule active reminders
    /// 3. Start the reminder listener (if enabled)
    pub async fn start(opts: ServiceOptions) -> DomainResult<Self> {
        let config = opts.config;
        info!("Starting parking service...");

        // ── Storage ────────────────────────────────────────────
        let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => {
                let dir = config.data_dir();
                info!("Storage: file backend at {}", dir.display());
                Arc::new(FileKeyValueStore::new(dir))
            }
            StorageBackend::Memory => {
                info!("Storage: in-memory backend (nothing survives restart)");
                Arc::new(InMemoryKeyValueStore::new())
            }
        };
        let repository = Arc::new(KeyValueReservationRepository::new(kv));

        // ── Event bus & dispatcher ─────────────────────────────
        let event_bus = create_event_bus();
        let dispatcher = Arc::new(TimerDispatcher::new(event_bus.clone(), opts.clock.clone()));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(config.service.shutdown_timeout_secs);

        // ── Store ──────────────────────────────────────────────
        let policy = config.policy();
        info!(
            "Reminder lead: {} min, extensions: {:?} min",
            policy.reminder_lead.num_minutes(),
            config.extensions.allowed_minutes
        );
        let store = Arc::new(
            ReservationStore::open(
                repository,
                dispatcher.clone(),
                event_bus.clone(),
                policy,
                opts.clock,
            )
            .await?,
        );

        // ── Reminder listener ──────────────────────────────────
        let (listener, notices) = if opts.listen_for_reminders {
            let listener = ReminderListener::new(store.clone(), event_bus.clone());
            let notices = listener.start(shutdown.signal());
            (Some(listener), Some(notices))
        } else {
            (None, None)
        };

        info!("Parking service started.");
        Ok(Self {
            event_bus,
            config,
            store,
            dispatcher,
            listener,
            notices,
            shutdown,
        })
    }

    pub fn store(&self) -> Arc<ReservationStore> {
        self.store.clone()
    }

    /// Take the receiving end of the reminder notice channel. `None` when
    /// the listener is disabled or the receiver was already taken.
    pub fn take_notices(&mut self) -> Option<mpsc::UnboundedReceiver<ReminderNotice>> {
        self.notices.take()
    }

    pub fn pending_reminders(&self) -> usize {
        self.dispatcher.pending_count()
    }

    pub async fn is_listening(&self) -> bool {
        match &self.listener {
            Some(listener) => listener.is_running().await,
            None => false,
        }
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger shutdown, stop pending timers and flush the store.
    /// Returns `false` when the flush did not finish in time.
    pub async fn shutdown(self) -> bool {
        info!("Shutting down parking service...");
        self.shutdown.signal().trigger();

        let store = self.store.clone();
        let dispatcher = self.dispatcher.clone();
        let clean = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                dispatcher.close();
                if let Err(e) = store.flush().await {
                    error!("Final flush failed: {}", e);
                }
            })
            .await;

        info!("Parking service shutdown complete");
        clean
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServiceHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::domain::parking_spot::catalog::sample_spots;
    use crate::support::time::ManualClock;

    fn file_config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_dir: Some(dir.to_path_buf()),
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn reservations_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::default();
        let spot = sample_spots().remove(0);

        let handle = ServiceHandle::start(ServiceOptions {
            config: file_config(dir.path()),
            clock: Arc::new(clock.clone()),
            listen_for_reminders: false,
        })
        .await
        .unwrap();
        let created = handle.store().create(&spot, 2, "WXY 1234", "Aina").await.unwrap();
        assert_eq!(handle.pending_reminders(), 1);
        assert!(handle.shutdown().await);

        let handle = ServiceHandle::start(ServiceOptions {
            config: file_config(dir.path()),
            clock: Arc::new(clock),
            listen_for_reminders: false,
        })
        .await
        .unwrap();
        assert_eq!(handle.store().get(created.id).await.unwrap(), created);
        assert_eq!(handle.pending_reminders(), 1);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn listener_runs_until_shutdown() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let mut handle = ServiceHandle::start(ServiceOptions {
            config,
            ..ServiceOptions::default()
        })
        .await
        .unwrap();
        assert!(handle.take_notices().is_some());
        assert!(handle.take_notices().is_none());

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(handle.is_listening().await);
        handle.shutdown().await;
    }
}
