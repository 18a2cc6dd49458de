//! Unified error types surfaced by the runtime API.
//!
//! Only setup and background plumbing can fail with a [`RuntimeError`]. The
//! decision path itself never errors: refusals and "nothing to do" are typed
//! outcomes ([`crate::LeaseValidation`], [`crate::SetResult`],
//! [`crate::Decision::none`]).
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("environment variable {name} has an invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("failed to build the feature status http client")]
    HttpClient(#[source] reqwest::Error),

    #[error("feature status request failed")]
    StatusRequest(#[source] reqwest::Error),

    #[error("feature status endpoint answered {0}")]
    StatusCode(u16),

    #[error("{kind} worker join failed")]
    WorkerJoin {
        kind: WorkerKind,
        #[source]
        source: tokio::task::JoinError,
    },
}

#[derive(Debug, Copy, Clone)]
pub enum WorkerKind {
    FeatureStatus,
}

impl fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkerKind::FeatureStatus => "feature status",
        };
        write!(f, "{}", label)
    }
}
