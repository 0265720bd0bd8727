//! Parking Service CLI
//!
//! Operator entry point: runs the reminder service or performs one-shot
//! reservation commands against the configured store.
//!
//! ```sh
//! # Run the reminder service with default config (~/.config/parking-service/config.toml)
//! parking-service run
//!
//! # Book the sample "Downtown Parking" spot for two hours
//! parking-service reserve --spot "Downtown Parking" --hours 2 --plate "WXY 1234" --name Aina
//!
//! # Extend by an hour, after checking the price
//! parking-service quote <id> --minutes 60
//! parking-service extend <id> --minutes 60
//!
//! # Validate config without starting
//! parking-service check
//! ```

use std::path::PathBuf;

use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use uuid::Uuid;

use parking_service::config::AppConfig;
use parking_service::domain::parking_spot::catalog::{find_by_name, sample_spots};
use parking_service::server::{init_tracing, ServiceHandle, ServiceOptions};
use parking_service::{DomainError, Reservation};

/// Parking reservations with expiry reminders.
#[derive(Parser, Debug)]
#[command(
    name = "parking-service",
    version,
    about = "Parking reservation service with expiry reminders",
    long_about = "Books parking spots by the hour, extends them in fixed increments \
                  and reminds the holder shortly before expiry.\n\n\
                  Default config: ~/.config/parking-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Override the storage directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reminder service until Ctrl+C.
    Run,
    /// List the sample spot catalog.
    Spots,
    /// Book a spot from the sample catalog.
    Reserve {
        /// Spot name (case-insensitive).
        #[arg(long)]
        spot: String,
        /// Whole hours to book.
        #[arg(long)]
        hours: i64,
        /// Vehicle plate number.
        #[arg(long)]
        plate: String,
        /// Holder name.
        #[arg(long)]
        name: String,
    },
    /// Extend a reservation by an allowed increment.
    Extend {
        id: Uuid,
        #[arg(long)]
        minutes: i64,
    },
    /// Show what an extension would cost without applying it.
    Quote {
        id: Uuid,
        #[arg(long)]
        minutes: i64,
    },
    /// List active reservations.
    List {
        /// Include expired reservations.
        #[arg(long)]
        all: bool,
    },
    /// Show one reservation.
    Show { id: Uuid },
    /// Validate the configuration file and exit.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(parking_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if matches!(cli.command, Command::Check) {
                eprintln!("Configuration is invalid: {}", e);
                return Err(e.into());
            }
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref dir) = cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    init_tracing(&config);
    info!("Configuration: {}", config_path.display());

    match cli.command {
        Command::Check => {
            println!("Configuration is valid");
            println!("   Config file  : {}", config_path.display());
            println!("   Storage      : {:?}", config.storage.backend);
            println!("   Data dir     : {}", config.data_dir().display());
            println!("   Reminder lead: {} min", config.reminders.lead_time_minutes);
            println!("   Extensions   : {:?} min", config.extensions.allowed_minutes);
            println!("   Log level    : {}", config.logging.level);
            Ok(())
        }
        Command::Spots => {
            for spot in sample_spots() {
                println!(
                    "{:<22} {:>6}/h  {:>4.1} km  {}",
                    spot.name, spot.price_per_hour, spot.distance_km, spot.spot_type
                );
            }
            Ok(())
        }
        Command::Run => run(config).await,
        command => one_shot(config, command).await,
    }
}

/// Long-running mode: print reminder notices until shutdown.
async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut handle = ServiceHandle::start(ServiceOptions {
        config,
        ..ServiceOptions::default()
    })
    .await?;
    handle.install_signal_handler();

    let active = handle.store().list_active().await;
    info!(
        "{} active reservations, {} reminders pending",
        active.len(),
        handle.pending_reminders()
    );
    info!("Press Ctrl+C to shutdown gracefully.");

    let shutdown = handle.shutdown_signal();
    if let Some(mut notices) = handle.take_notices() {
        loop {
            tokio::select! {
                notice = notices.recv() => {
                    let Some(notice) = notice else { break };
                    println!(
                        "[{}] {} ({}, plate {})",
                        notice.title, notice.body, notice.reservation_id, notice.plate_number
                    );
                }
                _ = shutdown.wait() => break,
            }
        }
    }

    if !handle.shutdown().await {
        error!("Shutdown did not complete in time");
    }
    Ok(())
}

async fn one_shot(config: AppConfig, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServiceHandle::start(ServiceOptions {
        config,
        listen_for_reminders: false,
        ..ServiceOptions::default()
    })
    .await?;
    let store = handle.store();

    let result: Result<(), DomainError> = async {
        match command {
            Command::Reserve {
                spot,
                hours,
                plate,
                name,
            } => {
                let catalog = sample_spots();
                let spot = find_by_name(&catalog, &spot).ok_or_else(|| DomainError::NotFound {
                    entity: "ParkingSpot",
                    field: "name",
                    value: spot.clone(),
                })?;
                let reservation = store.create(spot, hours, &plate, &name).await?;
                print_reservation(&reservation);
            }
            Command::Extend { id, minutes } => {
                let reservation = store.extend(id, extension_minutes(minutes)?).await?;
                print_reservation(&reservation);
            }
            Command::Quote { id, minutes } => {
                let quote = store.quote_extension(id, extension_minutes(minutes)?).await?;
                println!("Extension     : +{} min", quote.added.num_minutes());
                println!("Additional    : {}", quote.additional_cost);
                println!("New end time  : {}", quote.new_end_time.with_timezone(&Local));
                println!("New total     : {}", quote.new_total);
            }
            Command::List { all } => {
                let reservations = if all {
                    store.list_all().await
                } else {
                    store.list_active().await.to_vec()
                };
                if reservations.is_empty() {
                    println!("No reservations");
                }
                for r in &reservations {
                    println!(
                        "{}  {:<22} {:<10} ends {}  total {}",
                        r.id,
                        r.spot.name,
                        r.plate_number,
                        r.end_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                        r.total_price
                    );
                }
            }
            Command::Show { id } => {
                let reservation = store.get(id).await?;
                print_reservation(&reservation);
            }
            Command::Run | Command::Spots | Command::Check => {}
        }
        Ok(())
    }
    .await;

    handle.shutdown().await;
    if let Err(e) = result {
        error!("{} failed: {}", e.kind(), e);
        return Err(e.into());
    }
    Ok(())
}

/// Minutes typed by the operator, rejected when they overflow a `Duration`.
fn extension_minutes(minutes: i64) -> Result<Duration, DomainError> {
    Duration::try_minutes(minutes).ok_or_else(|| {
        DomainError::InvalidDuration(format!("{} minutes is out of range", minutes))
    })
}

fn print_reservation(r: &Reservation) {
    println!("Reservation   : {}", r.id);
    println!("Spot          : {} ({})", r.spot.name, r.spot.spot_type);
    println!("Holder        : {} / {}", r.holder_name, r.plate_number);
    println!("Start         : {}", r.start_time.with_timezone(&Local));
    println!("End           : {}", r.end_time.with_timezone(&Local));
    println!("Booked        : {} h", r.booked_hours);
    for e in &r.extensions {
        println!("  extended    : +{} min for {}", e.added_minutes, e.cost);
    }
    println!("Total         : {}", r.total_price);
}
