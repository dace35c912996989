//! The abstract request capability.
//!
//! The resolution engine performs exactly two kinds of network activity: a
//! HEAD-equivalent reachability probe against `https://<hostname>`, and the
//! fallback lookup request built by the embedder's resolver function. Both
//! go through the [`Fetch`] trait, so the engine never owns a transport —
//! embedders plug in whatever HTTP client they already have, and tests plug
//! in mocks.
//!
//! # Design Notes
//!
//! - Methods take `&self` so a single `Arc<dyn Fetch>` serves concurrent
//!   pipelines without mutable access.
//! - Boxed futures keep the trait object-safe.
//! - Implementations report failures via [`FetchError`]; the engine maps
//!   every one of them to a degraded-success outcome.

use crate::base::FetchError;
use bytes::Bytes;
use futures::future::BoxFuture;
use http::Method;
use std::sync::Arc;

/// Signal reported by a probe request that completed usefully.
///
/// Either variant means the hostname answered under its own name, so no
/// fallback lookup is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeSignal {
    /// The server returned any response.
    Response,
    /// The server redirected; still proof of reachability.
    Redirect,
}

/// Description of an HTTP request to perform.
///
/// This is what the configured fallback resolver produces for a hostname.
/// The URL is kept as an opaque string; validating it is the transport's
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    /// Shorthand for a GET request, the common case for lookup services.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }
}

/// Alias for the `Future` returned by a reachability probe.
pub type Probing = BoxFuture<'static, Result<ProbeSignal, FetchError>>;

/// Alias for the `Future` returned by a body-producing request.
pub type Fetching = BoxFuture<'static, Result<Bytes, FetchError>>;

/// Trait for issuing the engine's network requests.
///
/// Implementations must be thread-safe; the engine shares one instance
/// across all per-hostname pipelines.
pub trait Fetch: Send + Sync {
    /// Issues a HEAD-equivalent reachability probe against `url`.
    ///
    /// Resolves with a [`ProbeSignal`] as soon as the server responds or
    /// redirects. Transport failures surface as [`FetchError`]; the engine
    /// treats them as "not reachable under its own name".
    fn probe(&self, url: &str) -> Probing;

    /// Performs the described request and buffers the complete response body.
    fn fetch(&self, request: RequestDescriptor) -> Fetching;
}

/// Blanket implementation for Arc-wrapped capabilities.
impl<F: Fetch + ?Sized> Fetch for Arc<F> {
    fn probe(&self, url: &str) -> Probing {
        (**self).probe(url)
    }

    fn fetch(&self, request: RequestDescriptor) -> Fetching {
        (**self).fetch(request)
    }
}
