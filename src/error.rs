use thiserror::Error;

// ways a single brew invocation can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrewError {
    #[error("{path} was not found")]
    NotFound { path: String },

    #[error("`brew {command}` exited with code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Could not run {path}: {message}")]
    Io { path: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Another task is still running")]
    Busy,

    #[error(transparent)]
    Brew(#[from] BrewError),

    #[error("Background task panicked: {0}")]
    Panicked(String),
}
