use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors raised at the configuration boundary.
///
/// Nothing on the per-tick path returns these; a rejected update leaves the
/// previously accepted snapshot in place.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration for {what}: {reason}")]
    InvalidConfiguration { what: &'static str, reason: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Simulator is no longer receiving parameter updates")]
    Disconnected,

    #[error("Configuration file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            what,
            reason: reason.into(),
        }
    }
}

/// Reject NaN and infinities.
pub fn ensure_finite(what: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite { what, value })
    }
}

/// Reject non-finite values and anything `<= 0`.
pub fn ensure_positive(what: &'static str, value: f64) -> SimResult<f64> {
    ensure_finite(what, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(what, format!("must be > 0, got {value}")))
    }
}
