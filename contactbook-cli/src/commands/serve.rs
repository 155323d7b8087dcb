//! HTTP server command
//!
//! Builds the process-wide database client, makes sure the contacts table
//! exists, then serves the contact API until shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use contactbook_server::db::DbClient;
use contactbook_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CONTACTBOOK_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Configuration errors are fatal: no database target, no server
    let db = DbClient::global().context("Failed to initialize database client")?;

    db.ensure_schema()
        .await
        .context("Failed to prepare contacts table")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(db.clone(), config)
        .await
        .context("Server error")?;

    Ok(())
}
