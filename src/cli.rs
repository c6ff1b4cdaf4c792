use std::env;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::PossibleValuesParser};

use crate::bootstrap::ExistingPolicy;
use crate::errors::BootstrapError;
use crate::models::Credentials;

const DEFAULT_URI: &str = "mongodb://localhost:27017";

pub fn cli() -> Command {
    Command::new("todolist-init")
        .about("Provision the todolist database: application user and todos collection")
        .arg(
            Arg::new("uri")
                .long("uri")
                .env("DATABASE_URL")
                .help("MongoDB connection string for an administrative account (falls back to MONGODB_URL)")
                .value_name("URI"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .env("APP_USER")
                .help("Username of the application account to create")
                .value_name("USER"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .env("APP_PASSWORD")
                .hide_env_values(true)
                .help("Password of the application account to create")
                .value_name("PASSWORD"),
        )
        .arg(
            Arg::new("if-exists")
                .long("if-exists")
                .help("What to do when the user or collection already exists")
                .value_parser(PossibleValuesParser::new(["fail", "skip"]))
                .default_value("fail")
                .value_name("POLICY"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the provisioning report as JSON")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub uri: String,
    pub credentials: Credentials,
    pub policy: ExistingPolicy,
    pub json: bool,
}

impl Config {
    /// Resolves parsed arguments into a run configuration.
    ///
    /// `APP_USER` and `APP_PASSWORD` must be set, but may be empty.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, BootstrapError> {
        let uri = matches
            .get_one::<String>("uri")
            .cloned()
            .or_else(|| env::var("MONGODB_URL").ok())
            .unwrap_or_else(|| DEFAULT_URI.to_string());

        let username = matches
            .get_one::<String>("user")
            .cloned()
            .ok_or(BootstrapError::MissingConfig("APP_USER"))?;
        let password = matches
            .get_one::<String>("password")
            .cloned()
            .ok_or(BootstrapError::MissingConfig("APP_PASSWORD"))?;

        let policy = matches
            .get_one::<String>("if-exists")
            .and_then(|name| ExistingPolicy::from_name(name))
            .unwrap_or_default();

        Ok(Self {
            uri,
            credentials: Credentials::new(username, password),
            policy,
            json: matches.get_flag("json"),
        })
    }
}
