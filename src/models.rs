use {
    mongodb::bson::{self, Document, doc},
    serde::Serialize,
};

pub const TARGET_DATABASE: &str = "todolist";
pub const TODOS_COLLECTION: &str = "todos";
pub const READ_WRITE_ROLE: &str = "readWrite";

/// Application credentials handed to the bootstrap by its caller.
///
/// Values are used exactly as given. An empty username or password is not
/// rejected here; the server decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn read_write(db: &str) -> Self {
        Self {
            role: READ_WRITE_ROLE.to_string(),
            db: db.to_string(),
        }
    }
}

/// A user account to be created in the target database.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user: String,
    pub pwd: String,
    pub roles: Vec<RoleGrant>,
}

impl NewUser {
    pub fn read_write(credentials: &Credentials, db: &str) -> Self {
        Self {
            user: credentials.username.clone(),
            pwd: credentials.password.clone(),
            roles: vec![RoleGrant::read_write(db)],
        }
    }

    /// Builds the `createUser` administrative command for this user.
    pub fn create_user_command(&self) -> Result<Document, bson::ser::Error> {
        let roles = self
            .roles
            .iter()
            .map(bson::to_bson)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(doc! {
            "createUser": self.user.as_str(),
            "pwd": self.pwd.as_str(),
            "roles": roles,
        })
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    AlreadyPresent,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub database: String,
    pub user: String,
    pub user_outcome: Outcome,
    pub role: RoleGrant,
    pub collection: String,
    pub collection_outcome: Outcome,
}
