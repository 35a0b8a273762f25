//! Error taxonomy shared across the workspace.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OobotError>;

#[derive(Debug, Error)]
pub enum OobotError {
    /// A gateway send/reply failed (network, permissions, rate limiting).
    /// Never retried by the core; the schedule self-heals on its own.
    #[error("gateway error: {0}")]
    Gateway(String),

    /// A configured channel id could not be resolved.
    #[error("channel resolution failed: {0}")]
    Resolve(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
