//! Resolution engine configuration.

use crate::fetch::RequestDescriptor;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The embedder-supplied fallback resolver function.
///
/// Given a hostname the probe could not reach, returns the request to issue
/// against an alternate lookup service that answers with IP candidates.
pub type FallbackFn = dyn Fn(&str) -> RequestDescriptor + Send + Sync;

/// Configuration installed once (or replaced) via
/// [`HostResolver::configure`](crate::resolver::HostResolver::configure).
#[derive(Clone)]
pub struct ResolverConfig {
    hostnames: Vec<String>,
    resolver: Arc<FallbackFn>,
    timeout: Duration,
}

impl ResolverConfig {
    /// Probe timeout applied when none is given or the given value is not
    /// positive.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

    /// Creates a configuration with the default probe timeout.
    ///
    /// `hostnames` is the ordered list of hostnames the embedder cares
    /// about; it drives [`resolve_all`](crate::resolver::HostResolver::resolve_all)
    /// and nothing else.
    pub fn new(hostnames: Vec<String>, resolver: Arc<FallbackFn>) -> Self {
        Self {
            hostnames,
            resolver,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the probe timeout in milliseconds.
    ///
    /// A non-positive value is coerced to [`Self::DEFAULT_TIMEOUT`].
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = if ms > 0 {
            Duration::from_millis(ms)
        } else {
            Self::DEFAULT_TIMEOUT
        };
        self
    }

    pub fn hostnames(&self) -> &[String] {
        &self.hostnames
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the fallback lookup request for `host`.
    pub fn lookup_request(&self, host: &str) -> RequestDescriptor {
        (self.resolver)(host)
    }
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("hostnames", &self.hostnames)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
