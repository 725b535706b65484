//! Parcel tracker command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database.
//! - Map subcommands onto `ParcelService` calls and print JSON results.
//!
//! # Invariants
//! - The CLI owns the connection; the store only borrows it.

use clap::{Parser, Subcommand};
use log::{error, info};
use parcel_core::db::open_db;
use parcel_core::{
    init_logging, ClientId, ParcelNumber, ParcelService, SqliteParcelRepository, TrackerConfig,
};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Track parcels through registered, sent and delivered states.
#[derive(Parser, Debug)]
#[command(name = "parcel-tracker", version)]
struct Args {
    /// SQLite database file (overrides PARCEL_TRACKER_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (overrides PARCEL_TRACKER_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides PARCEL_TRACKER_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new parcel
    Register {
        #[arg(long)]
        client: ClientId,
        #[arg(long)]
        address: String,
    },
    /// Show one parcel
    Get { number: ParcelNumber },
    /// List all parcels of a client
    List {
        #[arg(long)]
        client: ClientId,
    },
    /// Change the address of a registered parcel
    SetAddress {
        number: ParcelNumber,
        address: String,
    },
    /// Advance a parcel to its next status
    NextStatus { number: ParcelNumber },
    /// Delete a registered parcel
    Delete { number: ParcelNumber },
    /// Register, ship, re-address and delete sample parcels for one client
    Demo {
        #[arg(long, default_value_t = 1)]
        client: ClientId,
    },
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = TrackerConfig::from_env()?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = Some(log_dir);
    }

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} db_path={}",
        parcel_core::core_version(),
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn)?);

    match args.command {
        Command::Register { client, address } => {
            print_json(&service.register(client, address)?)?;
        }
        Command::Get { number } => print_json(&service.get(number)?)?,
        Command::List { client } => print_json(&service.client_parcels(client)?)?,
        Command::SetAddress { number, address } => {
            service.change_address(number, &address)?;
            print_json(&service.get(number)?)?;
        }
        Command::NextStatus { number } => {
            let status = service.next_status(number)?;
            print_json(&json!({ "number": number, "status": status }))?;
        }
        Command::Delete { number } => {
            service.delete(number)?;
            print_json(&json!({ "number": number, "deleted": true }))?;
        }
        Command::Demo { client } => run_demo(&service, client)?,
    }

    Ok(())
}

// Exercises every lifecycle rule against one client: re-address while
// registered, ship, deliver, then delete a parcel that never left.
fn run_demo(
    service: &ParcelService<SqliteParcelRepository<'_>>,
    client: ClientId,
) -> Result<(), Box<dyn Error>> {
    let first = service.register(client, "12 Harbour Road")?;
    service.change_address(first.number, "48 Station Street")?;
    service.next_status(first.number)?;

    let second = service.register(client, "7 Mill Lane")?;
    let third = service.register(client, "3 Quay Side")?;
    service.next_status(second.number)?;
    service.next_status(second.number)?;

    println!("parcels of client {client}:");
    print_json(&service.client_parcels(client)?)?;

    service.delete(third.number)?;

    println!("parcels of client {client} after removing registered parcel {}:", third.number);
    print_json(&service.client_parcels(client)?)?;
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;

    #[test]
    fn parses_register_with_global_db_flag() {
        let args = Args::try_parse_from([
            "parcel-tracker",
            "register",
            "--client",
            "1000",
            "--address",
            "test",
            "--db",
            "/tmp/tracker.db",
        ])
        .unwrap();

        assert_eq!(args.db.as_deref().and_then(|p| p.to_str()), Some("/tmp/tracker.db"));
        assert!(matches!(
            args.command,
            Command::Register { client: 1000, ref address } if address == "test"
        ));
    }

    #[test]
    fn demo_client_defaults_to_one() {
        let args = Args::try_parse_from(["parcel-tracker", "demo"]).unwrap();
        assert!(matches!(args.command, Command::Demo { client: 1 }));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["parcel-tracker"]).is_err());
    }
}
