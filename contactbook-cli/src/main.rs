//! contactbook CLI - contact list server and helpers
//!
//! - `serve`: run the contact HTTP API against the configured database
//! - `db-config`: show the resolved database target (credentials masked)
//! - `check`: validate contact fields the same way the API does
//! - `format-phone`: display formatting for US phone numbers

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "contactbook",
    author,
    version,
    about = "Contact list service backed by SQLite or PostgreSQL",
    long_about = "Manage a contact list over HTTP. The database engine comes from APP_DB_ENGINE \
                  (sqlite or postgres) and the URL from SQLITE_DATABASE_URL, POSTGRES_DATABASE_URL \
                  or DATABASE_URL. A .env file in the working directory is loaded first."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the contact HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Show the resolved database engine, source variable and redacted URL
    DbConfig(commands::db_config::DbConfigArgs),
    /// Validate contact fields and print the normalized record
    Check(commands::check::CheckArgs),
    /// Format a phone number for display
    FormatPhone(commands::check::FormatPhoneArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; variables may come from the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::DbConfig(args) => commands::run_db_config(args)?,
        Commands::Check(args) => commands::run_check(args)?,
        Commands::FormatPhone(args) => commands::run_format_phone(args)?,
    }
    Ok(())
}
