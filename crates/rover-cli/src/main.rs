//! `rover-cli` – plateau rover command line interface
//!
//! This binary is the front-end for the navigation engine.  It:
//!
//! 1. Loads `~/.rover/config.toml` (defaults when absent) plus `ROVER_*`
//!    environment overrides.
//! 2. Reads a mission from the TOML file given as the first argument, or
//!    prompts for one interactively when no argument is given.
//! 3. Navigates every rover and prints one `x y H` line per rover, followed
//!    by a note for each rover that was kept stationary.

mod config;
mod mission;
mod prompt;

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tracing::{info, warn};

use config::{Config, LogFormat};
use mission::Mission;

fn main() -> ExitCode {
    let (cfg, config_error) = match config::resolve() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(cfg.log_format);

    if let Some(e) = config_error {
        warn!(error = %e, "Falling back to default configuration");
        eprintln!("{}: {}", "Config error".red(), e);
        eprintln!("  Using default configuration.");
    }

    let arg = std::env::args().nth(1);
    let mission = match arg.as_deref() {
        Some("-h") | Some("--help") => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Some("--init-config") => {
            return match config::save(&cfg) {
                Ok(()) => {
                    println!(
                        "  {} Config saved to {}",
                        "✓".green().bold(),
                        config::config_path().display().to_string().bold()
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}: {}", "Error saving config".red(), e);
                    ExitCode::FAILURE
                }
            };
        }
        Some(path) => Mission::load_from(Path::new(path)),
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt::collect_mission(&mut stdin.lock(), &mut stdout).map_err(|e| e.to_string())
        }
    };

    let mission = match mission {
        Ok(mission) => mission,
        Err(e) => {
            eprintln!("{}: {}", "Mission error".red(), e);
            return ExitCode::FAILURE;
        }
    };

    let navigation = match mission.build(&cfg) {
        Ok(navigation) => navigation,
        Err(e) => {
            eprintln!("{}: {}", "Invalid mission".red(), e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        rovers = navigation.rovers().len(),
        policy = %cfg.move_policy,
        collision_checks = cfg.collision_checks,
        log_format = %cfg.log_format,
        "starting navigation"
    );
    let report = mission::run(navigation);

    println!("{}", report.render());
    for stationary in &report.stationary {
        eprintln!(
            "{} rover {}: {}",
            "note:".yellow().bold(),
            stationary.rover_index,
            stationary.reason
        );
    }

    ExitCode::SUCCESS
}

/// Initialise tracing-subscriber using RUST_LOG (defaults to "info").
/// Logs go to stderr so stdout carries only the final rover lines.
fn init_logging(format: LogFormat) {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .init(),
    }
}

fn print_usage() {
    println!(
        "{} {}",
        "rover".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!();
    println!("Usage:");
    println!("  rover                 enter a mission interactively");
    println!("  rover <MISSION.toml>  run the mission described in a TOML file");
    println!(
        "  rover --init-config   write the effective config to {}",
        config::config_path().display()
    );
    println!();
    println!("Environment overrides:");
    println!("  ROVER_MOVE_POLICY=fail|clamp");
    println!("  ROVER_COLLISION_CHECKS=true|false");
    println!("  ROVER_LOG_FORMAT=compact|json");
}
