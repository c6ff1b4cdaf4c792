use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("failed to connect to the database server: {0}")]
    Connect(#[from] mongodb::error::Error),
    #[error("{step} failed: {source}")]
    Session {
        step: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("refusing to provision database `{actual}`, expected `{expected}`")]
    WrongDatabase {
        expected: &'static str,
        actual: String,
    },
    #[error("missing required configuration value {0}")]
    MissingConfig(&'static str),
    #[error("failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl BootstrapError {
    pub fn session<E>(step: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BootstrapError::Session {
            step,
            source: Box::new(err),
        }
    }
}
