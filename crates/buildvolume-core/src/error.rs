use thiserror::Error;

/// Errors produced while loading catalog data or reference models.
#[derive(Debug, Error)]
pub enum Error {
    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid dimensions for '{name}': {x} x {y} x {z}")]
    InvalidDimensions { name: String, x: f32, y: f32, z: f32 },

    #[error("model decode error: {0}")]
    Model(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
