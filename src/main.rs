//! Configuration baseline auditor.
//!
//! # Architecture Overview
//!
//! ```text
//!   audit.toml ──▶ config ──▶ lifecycle::startup
//!                               │
//!          terms.csv ───────────┤  mapping (variable → regex fragment)
//!          variables.csv ───────┤
//!          templates/*.conf ────┘  template library
//!                               │
//!                               ▼
//!   snapshots/<device>/ ──▶ RefreshController ──▶ reports/<device>/*.json
//!                               ▲   freshness → compile → match → save
//!                               │
//!              FleetRunner (bounded, per-device serialised)
//!                               ▲
//!              CLI commands / SnapshotWatcher events
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use baseline_audit::config::{load_config, AuditConfig};
use baseline_audit::fleet::{watch_fleet, DeviceAudit, FleetRunner};
use baseline_audit::freshness::ScanOutcome;
use baseline_audit::lifecycle::{build_controller, select_devices, shutdown_on_signal, Shutdown};
use baseline_audit::observability::{logging, metrics};
use baseline_audit::store::FsStore;

#[derive(Parser)]
#[command(name = "baseline-audit")]
#[command(about = "Audit device configurations against baseline templates", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "audit.toml")]
    config: PathBuf,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the fleet (or the named devices), rescanning stale reports
    Audit {
        #[arg(short, long = "device")]
        devices: Vec<String>,

        /// Discard stored reports and rescan regardless of freshness
        #[arg(short, long)]
        force: bool,
    },
    /// Show the latest stored status without scanning
    Status {
        #[arg(short, long = "device")]
        devices: Vec<String>,
    },
    /// Compile every template variant and report errors
    CheckTemplates,
    /// Re-audit devices as new snapshots arrive
    Watch,
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(path = %cli.config.display(), error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!(
        config = %cli.config.display(),
        devices = config.devices.len(),
        "baseline-audit v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    match run(cli, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one device failed.
async fn run(cli: Cli, config: AuditConfig) -> Result<bool, BoxError> {
    let controller = build_controller(&config)?;

    match cli.command {
        Commands::Audit { devices, force } => {
            let devices = select_devices(&config, &devices)?;
            let fleet = FleetRunner::new(controller, config.fleet.max_concurrent_scans);
            let audits = fleet.run(devices, force).await;
            print_audits(&audits, cli.json)?;
            Ok(audits.iter().all(|a| !a.is_failure()))
        }
        Commands::Status { devices } => {
            let devices = select_devices(&config, &devices)?;
            let mut ok = true;
            let mut rows = Vec::new();

            for device in &devices {
                let freshness = controller.freshness(&device.name);
                let latest = controller.latest_report(&device.name);
                match (freshness, latest) {
                    (Ok(freshness), Ok(report)) => {
                        let status = report.as_ref().map(|r| r.report.status.as_str()).unwrap_or("none");
                        let generated_at = report.as_ref().map(|r| r.generated_at.as_str());
                        if !cli.json {
                            println!(
                                "{:<24} {:<14} {:<10} {}",
                                device.name,
                                status,
                                freshness.as_str(),
                                generated_at.unwrap_or("-")
                            );
                        }
                        rows.push(json!({
                            "device": device.name,
                            "status": status,
                            "freshness": freshness,
                            "generated_at": generated_at,
                        }));
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        ok = false;
                        tracing::error!(device = %device.name, error = %e, "Cannot read stored artifacts");
                        rows.push(json!({ "device": device.name, "error": e.to_string() }));
                    }
                }
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            Ok(ok)
        }
        Commands::CheckTemplates => {
            let results = controller.verify_templates();
            let ok = results.iter().all(|(_, r)| r.is_ok());

            if cli.json {
                let rows: Vec<_> = results
                    .iter()
                    .map(|(augmentation, result)| match result {
                        Ok(patterns) => json!({ "augmentation": augmentation, "patterns": patterns }),
                        Err(e) => json!({ "augmentation": augmentation, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (augmentation, result) in &results {
                    match result {
                        Ok(patterns) => println!("{augmentation:?}: ok ({patterns} mandatory patterns)"),
                        Err(e) => println!("{augmentation:?}: error: {e}"),
                    }
                }
            }
            Ok(ok)
        }
        Commands::Watch => {
            let fleet = FleetRunner::new(controller, config.fleet.max_concurrent_scans);
            watch(fleet, &config, cli.json).await?;
            Ok(true)
        }
    }
}

async fn watch(fleet: FleetRunner<FsStore>, config: &AuditConfig, json: bool) -> Result<(), BoxError> {
    let shutdown = Shutdown::new();
    shutdown_on_signal(shutdown.clone());

    watch_fleet(&fleet, config, shutdown.subscribe(), |audits| {
        if let Err(e) = print_audits(audits, json) {
            tracing::error!(error = %e, "Failed to print audit results");
        }
    })
    .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_audits(audits: &[DeviceAudit], json: bool) -> Result<(), BoxError> {
    if json {
        let rows: Vec<_> = audits
            .iter()
            .map(|audit| match &audit.result {
                Ok(outcome) => json!({
                    "device": audit.device,
                    "outcome": outcome.label(),
                    "discarded": match outcome {
                        ScanOutcome::Refreshed { discarded, .. } => *discarded,
                        _ => 0,
                    },
                    "report": outcome.report(),
                }),
                Err(e) => json!({ "device": audit.device, "outcome": "error", "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for audit in audits {
        match &audit.result {
            Ok(outcome) => match outcome.report() {
                Some(stored) => {
                    println!("{} [{}] {}", audit.device, outcome.label(), stored.generated_at);
                    print!("{}", stored.report);
                }
                None => println!("{} [{}]", audit.device, outcome.label()),
            },
            Err(e) => println!("{} [error] {}", audit.device, e),
        }
    }
    Ok(())
}
