use thiserror::Error;

/// Errors surfaced by the resolution engine's public operations.
///
/// This is deliberately tiny: the engine's contract is "never reject" —
/// transport and parse failures during resolution are downgraded to a
/// best-effort target (the original hostname) before they reach a caller.
/// The only failure a caller can observe is using the engine before it has
/// been configured.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ResolveError {
    #[error("resolver is not configured; call configure() first")]
    NotConfigured,
}

/// Failures reported by a [`Fetch`](crate::fetch::Fetch) implementation.
///
/// These never cross the engine's public boundary. A probe error only
/// suppresses the "directly reachable" outcome of the probe/timeout race;
/// a fallback error clears the pending-cache entry and resolves the call
/// to the original hostname.
#[derive(Debug, Error, Clone)]
pub enum FetchError {
    /// The request could not be performed or the connection failed mid-flight.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response was aborted before the full body arrived.
    #[error("response aborted before completion")]
    Aborted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(
            ResolveError::NotConfigured.to_string(),
            "resolver is not configured; call configure() first"
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert_eq!(
            FetchError::Aborted.to_string(),
            "response aborted before completion"
        );
    }
}
