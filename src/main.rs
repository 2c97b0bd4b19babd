use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

// Core modules
mod cli;
mod commands;
mod config;

// Architecture modules
mod domain;
mod error;
mod infrastructure;
mod services;
mod ui;

use cli::{Cli, Commands};
use commands::asset::UploadOptions;
use config::{validate_env_var_name, ClientConfig, Credential, FileConfig};
use infrastructure::ApiClient;

/// Resolve configuration layers and build the API client
fn build_client(cli: &Cli) -> Result<ApiClient> {
    let file = FileConfig::load(cli.config.as_deref()).context("Failed to load config file")?;

    // The file's token_var only applies when no auth flag was given
    let file_token_var = file
        .as_ref()
        .and_then(|f| f.token_var.as_deref())
        .map(validate_env_var_name)
        .transpose()?;
    let token_var = cli.auth_token_var.clone().or(file_token_var);
    let credential = Credential::resolve(cli.auth_token.clone(), token_var.as_deref())?;

    let config = ClientConfig::layered(
        cli.repo_slug.clone(),
        credential,
        file.as_ref(),
        cli.api_url.clone(),
        cli.timeout,
    )?;
    debug!(
        api_url = %config.api_url,
        repo = %config.repo,
        timeout = ?config.timeout,
        "Client configured"
    );

    Ok(ApiClient::new(config)?)
}

async fn run(cli: Cli) -> Result<bool> {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Create { tag, release } => {
            commands::release::create(&client, release.create(tag)).await
        }
        Commands::Edit {
            selector,
            release,
            switch_tag_to,
        } => {
            commands::release::edit(&client, selector.selector()?, release.fields(switch_tag_to))
                .await
        }
        Commands::Delete { selector } => {
            commands::release::delete(&client, selector.selector()?).await
        }
        Commands::UploadAsset {
            selector,
            asset,
            max_assets,
            replace,
            files,
        } => {
            commands::asset::upload(
                &client,
                UploadOptions {
                    selector: selector.selector()?,
                    files,
                    name: asset.name,
                    label: asset.label,
                    replace,
                    max_assets,
                },
            )
            .await
        }
        Commands::EditAsset { asset_id, asset } => {
            commands::asset::edit(&client, asset_id, asset.edit()).await
        }
        Commands::DeleteAsset { asset_id } => commands::asset::delete(&client, asset_id).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false) // Disable ANSI escape codes for cleaner output
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ui::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
