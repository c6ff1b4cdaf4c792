use tracing::{info, warn};

use crate::db::AdminSession;
use crate::errors::BootstrapError;
use crate::models::{
    BootstrapReport, Credentials, NewUser, Outcome, RoleGrant, TARGET_DATABASE, TODOS_COLLECTION,
};

/// What to do when the user or collection is already there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingPolicy {
    /// Issue the create commands unconditionally and let the server reject
    /// duplicates.
    #[default]
    Fail,
    /// Look before creating and leave existing objects untouched.
    Skip,
}

impl ExistingPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fail" => Some(ExistingPolicy::Fail),
            "skip" => Some(ExistingPolicy::Skip),
            _ => None,
        }
    }
}

/// Provisions the `todolist` database through `session`.
///
/// Creates the application user with a single `readWrite` grant on the
/// target database, then the empty `todos` collection. Steps run in that
/// order and the first error ends the run; nothing already created is undone.
pub async fn bootstrap<S: AdminSession>(
    session: &S,
    credentials: &Credentials,
    policy: ExistingPolicy,
) -> Result<BootstrapReport, BootstrapError> {
    let database = session.database_name();
    if database != TARGET_DATABASE {
        return Err(BootstrapError::WrongDatabase {
            expected: TARGET_DATABASE,
            actual: database.to_string(),
        });
    }

    let new_user = NewUser::read_write(credentials, TARGET_DATABASE);
    let user_outcome = ensure_user(session, &new_user, policy).await?;
    let collection_outcome = ensure_collection(session, TODOS_COLLECTION, policy).await?;

    Ok(BootstrapReport {
        database: TARGET_DATABASE.to_string(),
        user: new_user.user,
        user_outcome,
        role: RoleGrant::read_write(TARGET_DATABASE),
        collection: TODOS_COLLECTION.to_string(),
        collection_outcome,
    })
}

async fn ensure_user<S: AdminSession>(
    session: &S,
    user: &NewUser,
    policy: ExistingPolicy,
) -> Result<Outcome, BootstrapError> {
    if policy == ExistingPolicy::Skip
        && session
            .user_exists(&user.user)
            .await
            .map_err(|e| BootstrapError::session("users-info", e))?
    {
        warn!(user = %user.user, "user already exists, leaving it unchanged");
        return Ok(Outcome::AlreadyPresent);
    }

    session
        .create_user(user)
        .await
        .map_err(|e| BootstrapError::session("create-user", e))?;

    info!(user = %user.user, database = TARGET_DATABASE, "created user with readWrite role");
    Ok(Outcome::Created)
}

async fn ensure_collection<S: AdminSession>(
    session: &S,
    name: &str,
    policy: ExistingPolicy,
) -> Result<Outcome, BootstrapError> {
    if policy == ExistingPolicy::Skip
        && session
            .collection_exists(name)
            .await
            .map_err(|e| BootstrapError::session("list-collections", e))?
    {
        warn!(collection = name, "collection already exists");
        return Ok(Outcome::AlreadyPresent);
    }

    session
        .create_collection(name)
        .await
        .map_err(|e| BootstrapError::session("create-collection", e))?;

    info!(collection = name, database = TARGET_DATABASE, "created collection");
    Ok(Outcome::Created)
}
