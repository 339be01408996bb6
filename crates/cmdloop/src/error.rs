use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the argument {0} could not be found")]
    ArgumentNotFound(String),

    #[error("no data was supplied for {0}")]
    NoUserData(String),

    #[error("the argument {0} does not exist and cannot be aliased")]
    Alias(String),

    #[error("there were too many arguments specified")]
    TooManyArguments,

    #[error("{0} requires a value")]
    MissingRequiredData(String),

    #[error("invalid exit code: {0}")]
    InvalidExitCode(String),

    #[error("{name} failed: {source}")]
    Callback {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_too_many_arguments(&self) -> bool {
        matches!(self, Self::TooManyArguments)
    }
}
