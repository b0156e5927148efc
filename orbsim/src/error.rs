//! Error types for building and running a simulation

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while configuring or stepping a simulation
///
/// Cancellation is not an error, see [`crate::simulation::driver::RunState`]
#[derive(Error, Debug)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("singularity: body {body} coincides with gravity source {against}")]
    Singularity { body: String, against: String },

    #[error("numerical instability at step {step}: state of body {body} is no longer finite")]
    NumericalInstability { step: usize, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Configuration(msg.into())
    }
}
