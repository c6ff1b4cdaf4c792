//! # todolist-init - one-shot provisioning for the todolist MongoDB database
//!
//! Creates the application user (read/write on `todolist`) and the empty
//! `todos` collection. Meant to run once against a fresh server, e.g. from a
//! container's first-start hook.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL` or `MONGODB_URL`: MongoDB connection string for an administrative account
//! - `APP_USER`: username of the application account to create
//! - `APP_PASSWORD`: password of the application account to create
//! - `RUST_LOG`: log filter (defaults to `info`)

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    bootstrap::bootstrap, cli::Config, db::MongoSession, errors::BootstrapError,
    models::{BootstrapReport, TARGET_DATABASE},
};

pub mod bootstrap;
pub mod cli;
pub mod db;
pub mod errors;
pub mod models;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    let config = Config::from_matches(&cli::cli().get_matches())?;

    let session = MongoSession::connect(&config.uri, TARGET_DATABASE).await?;
    let report = bootstrap(&session, &config.credentials, config.policy).await?;

    if config.json {
        println!("{}", render_report(&report)?);
    }

    info!(
        database = %report.database,
        user = %report.user,
        collection = %report.collection,
        "provisioning finished"
    );

    Ok(())
}

fn render_report(report: &BootstrapReport) -> Result<String, BootstrapError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
