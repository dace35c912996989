//! # hostnet
//!
//! Probe-then-fallback hostname resolution for embedding applications.
//!
//! `hostnet` decides, per hostname, whether a direct connection to that
//! hostname works or whether an alternate HTTP-based lookup must supply an
//! IP to use instead. It is aimed at applications that need to route around
//! environments where a hostname's default connection attempt is blocked or
//! redirected, falling back only when necessary and caching the outcome for
//! the life of the process.
//!
//! ## How resolution works
//!
//! For each hostname the engine walks a fixed precedence:
//!
//! 1. **Static rules** — `MAP <host> <ip>` overrides supplied out-of-band
//!    (typically via `--host-resolver-rules`) win outright; no probe runs.
//! 2. **Cached results** — a prior resolution for the hostname is reused;
//!    concurrent callers share a single in-flight pipeline.
//! 3. **Live probe** — a HEAD request to `https://<hostname>` raced against
//!    a timeout. Any response or redirect means the hostname is usable as-is.
//! 4. **Fallback lookup** — an embedder-supplied resolver builds an HTTP
//!    request returning `{"ips": [...]}`; the first IP (if any) is cached
//!    and used.
//!
//! Resolution never fails past the configuration check: every transport or
//! parse problem degrades to "use the original hostname".
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostnet::fetch::RequestDescriptor;
//! use hostnet::resolver::{HostResolver, ResolverConfig};
//! use std::sync::Arc;
//!
//! let resolver = HostResolver::new(Arc::new(my_fetch));
//! resolver.configure(ResolverConfig::new(
//!     vec!["api.example.com".into()],
//!     Arc::new(|host| {
//!         RequestDescriptor::get(format!("https://lookup.example.com/{host}"))
//!     }),
//! ));
//!
//! let target = resolver.resolve("api.example.com")?.await;
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`rules`] - Static rule table and rule-string parsing
//! - [`fetch`] - The abstract request capability used for probes and lookups
//! - [`resolver`] - The resolution engine, caches, and pipeline

pub mod base;
pub mod fetch;
pub mod resolver;
pub mod rules;
