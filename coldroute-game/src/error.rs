//! Error types surfaced to callers of the routing engine.
use thiserror::Error;

/// Failures reported by route operations. None of these leave the engine in a
/// partially updated state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown location '{name}'")]
    InvalidLocation { name: String },
    #[error("no route from {origin} to {destination}")]
    NoRouteFound { origin: String, destination: String },
    #[error("edge {from}-{to} not found")]
    InvalidEdgeReference { from: String, to: String },
    #[error("malformed disruption input '{input}' (expected City1-City2)")]
    MalformedDisruptionInput { input: String },
}

impl RouteError {
    pub(crate) fn missing_edge(from: &str, to: &str) -> Self {
        Self::InvalidEdgeReference {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Errors raised when network, catalog, or engine configuration is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("city '{name}' is listed more than once")]
    DuplicateCity { name: String },
    #[error("city '{from}' links to unknown city '{to}'")]
    UnknownLinkTarget { from: String, to: String },
    #[error("link {from}-{to} must have a positive weight")]
    NonPositiveWeight { from: String, to: String },
    #[error("city '{name}' links to itself")]
    SelfLoop { name: String },
    #[error("link {from}-{to} is listed more than once")]
    DuplicateLink { from: String, to: String },
    #[error("cargo item '{name}' is listed more than once")]
    DuplicateItem { name: String },
    #[error("cargo item '{name}' must have a positive shelf life (got {shelf_life})")]
    NonPositiveShelfLife { name: String, shelf_life: i32 },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u64,
        value: u64,
    },
}
