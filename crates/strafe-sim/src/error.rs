use thiserror::Error;

use crate::key::StrafeKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("iteration count must be at least 1")]
    NoIterations,

    #[error("invalid {name} range: low {low}ms is greater than high {high}ms")]
    InvertedRange {
        name: &'static str,
        low: u64,
        high: u64,
    },

    #[error("left and right keys are both bound to {0:?}")]
    DuplicateBinding(char),
}

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("key injection backend unavailable: {0}")]
    Backend(String),

    #[error("failed to {action} key {key:?}: {reason}")]
    Key {
        key: StrafeKey,
        action: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Inject(#[from] InjectError),

    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}
