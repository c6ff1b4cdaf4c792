//! # Administrative session module
//!
//! This module owns the connection to the MongoDB server and exposes the
//! handful of administrative commands the bootstrap needs.
//!
//! ## Configuration
//!
//! The connection string comes from the CLI layer:
//! - `--uri`, `DATABASE_URL` or `MONGODB_URL`: MongoDB connection string
//!
//! The credentials inside the connection string must belong to an account
//! allowed to create users and collections (typically the root user set up by
//! the container image).

use mongodb::{
    Client, Database,
    bson::{self, Document, doc},
    options::ClientOptions,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::BootstrapError;
use crate::models::NewUser;

const APP_NAME: &str = "todolist-init";

/// Administrative commands against a single, already selected database.
///
/// Implementations never switch databases on their own; everything runs
/// against the database returned by [`AdminSession::database_name`].
#[allow(async_fn_in_trait)]
pub trait AdminSession {
    type Error: std::error::Error + Send + Sync + 'static;

    fn database_name(&self) -> &str;

    async fn user_exists(&self, username: &str) -> Result<bool, Self::Error>;

    async fn create_user(&self, user: &NewUser) -> Result<(), Self::Error>;

    async fn collection_exists(&self, name: &str) -> Result<bool, Self::Error>;

    async fn create_collection(&self, name: &str) -> Result<(), Self::Error>;
}

/// Session backed by the official MongoDB driver.
pub struct MongoSession {
    db: Database,
}

impl MongoSession {
    /// Selects `db_name` on the server at `uri` and checks the server answers.
    ///
    /// Selecting a database does not create it; MongoDB materializes it with
    /// the first user or collection written into it.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, BootstrapError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let session = Self::from(client.database(db_name));
        session.ping().await?;

        debug!(database = db_name, "connected to MongoDB");

        Ok(session)
    }

    /// Runs `ping` against the selected database only.
    async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UsersInfoReply {
    users: Vec<Document>,
}

/// Reads a `usersInfo` reply; a reply without a `users` array is an error.
fn user_listed(reply: Document) -> Result<bool, mongodb::error::Error> {
    let reply: UsersInfoReply = bson::from_document(reply)?;
    Ok(!reply.users.is_empty())
}

impl From<Database> for MongoSession {
    fn from(db: Database) -> Self {
        Self { db }
    }
}

impl AdminSession for MongoSession {
    type Error = mongodb::error::Error;

    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn user_exists(&self, username: &str) -> Result<bool, Self::Error> {
        let response = self
            .db
            .run_command(doc! {
                "usersInfo": { "user": username, "db": self.db.name() },
            })
            .await?;

        user_listed(response)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), Self::Error> {
        let command = user.create_user_command()?;
        self.db.run_command(command).await?;
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, Self::Error> {
        let names = self
            .db
            .list_collection_names()
            .filter(doc! { "name": name })
            .await?;

        Ok(names.iter().any(|n| n == name))
    }

    async fn create_collection(&self, name: &str) -> Result<(), Self::Error> {
        self.db.create_collection(name).await
    }
}
