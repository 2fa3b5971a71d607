// Medrec - Transactional hospital-records service core
// Copyright (c) 2026 Medrec Contributors
// Licensed under the MIT License

use clap::Parser;
use medrec::adapters::postgresql::PostgresClient;
use medrec::cli::{Cli, Commands};
use medrec::config::load_config;
use medrec::domain::Result;
use medrec::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional; a missing .env file is silently ignored.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    let log_level = cli
        .log_level
        .unwrap_or_else(|| config.application.log_level.clone());
    let _guard = init_logging(&log_level, &config.logging)?;

    let client = PostgresClient::new(config.database).await?;

    match cli.command {
        Commands::Check => {
            client.test_connection().await?;
            tracing::info!(
                database = %client.connection_string_safe(),
                "Database connection OK"
            );
        }
        Commands::Migrate => {
            client.ensure_schema().await?;
            tracing::info!(
                database = %client.connection_string_safe(),
                "Schema migration applied"
            );
        }
    }

    Ok(())
}
