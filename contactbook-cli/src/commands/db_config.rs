//! Show which database the environment selects, with credentials masked

use anyhow::{Context, Result};
use clap::Parser;
use contactbook_core::db_config::{resolve_from_process_env, DbEngine, SourceEnvKey};
use serde::Serialize;

/// Arguments for the db-config command
#[derive(Parser, Debug)]
pub struct DbConfigArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DbConfigReport {
    engine: DbEngine,
    source_env_key: SourceEnvKey,
    url: String,
}

pub fn run_db_config(args: DbConfigArgs) -> Result<()> {
    let config = resolve_from_process_env().context("Invalid database configuration")?;
    let report = DbConfigReport {
        engine: config.engine,
        source_env_key: config.source_env_key,
        url: config.redacted_url(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("engine: {}", report.engine);
        println!("source: {}", report.source_env_key);
        println!("url:    {}", report.url);
    }
    Ok(())
}
