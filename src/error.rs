//! Error taxonomy for site initialisation and browser calls.
//!
//! None of these reach the visitor. Initialisers return them, the bootstrap
//! logs them and keeps wiring the remaining features.

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("required element missing: {selector}")]
    MissingElement { selector: String },
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("case study content: {0}")]
    Content(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl SiteError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement { selector: selector.into() }
    }

    /// Whether the error only means "this feature is not on the page".
    #[must_use]
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::MissingElement { .. })
    }
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;
