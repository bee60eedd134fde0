use thiserror::Error;

/// Errors surfaced by the fallible edges of the crate: decoding host measure
/// specs and reading declarative configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The host handed down a packed measure spec with mode bits that no
    /// measurement mode maps to. This is a host contract violation.
    #[error("unknown measure spec mode bits {0:#04b}")]
    UnknownMeasureMode(u32),

    #[error("unknown interpolator `{0}`")]
    UnknownInterpolator(String),

    #[error("unknown gravity flag `{0}`")]
    UnknownGravity(String),

    #[error("unknown expand direction `{0}`")]
    UnknownDirection(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
