use thiserror::Error;

/// Errors raised when a simulation run is misconfigured.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("profile catalog is empty")]
    EmptyCatalog,
    #[error("profile {profile}: {field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    ProfileRange {
        profile: String,
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("profile {profile}: patience must be positive")]
    ZeroPatience { profile: String },
    #[error("session count must be positive")]
    NoSessions,
    #[error("failed to parse profile catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}
