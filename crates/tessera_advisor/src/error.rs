//! Error types for the advisory boundary.

use std::time::Duration;

/// Reasons an advisory backend produced no usable answer.
///
/// The [`crate::Advisor`] never surfaces these to its callers; each one
/// triggers the local fallback and is recorded on the returned advice.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// The backend failed to produce a response.
    #[error("advisory backend failed: {0}")]
    Backend(String),

    /// The backend did not answer within the configured timeout.
    #[error("advisory backend timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with something that is not valid JSON.
    #[error("advisory backend returned invalid JSON: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display() {
        let err = AdvisorError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "advisory backend timed out after 5s");
    }

    #[test]
    fn invalid_response_display() {
        let err = AdvisorError::InvalidResponse("expected value at line 1".into());
        assert!(err.to_string().contains("invalid JSON"));
    }
}
