//! Error type shared by the simulation core and the scenario loader

use thiserror::Error;

/// Errors raised while building, reconfiguring or loading a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// The body store could not be allocated; nothing was built
    #[error("out of memory: could not allocate a body store of {requested} bodies")]
    OutOfMemory { requested: usize },

    /// A configuration value was rejected before reaching the core
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SimResult<T> = Result<T, SimError>;
