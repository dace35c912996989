//! The hostname resolution engine.
//!
//! [`HostResolver`] owns all resolution state: the static rule table, the
//! pending-resolution cache that de-duplicates concurrent requests, and the
//! configuration installed via [`HostResolver::configure`].
//!
//! Per-hostname resolution runs a single-attempt pipeline:
//!
//! 1. **Static lookup** — a rule-table hit answers immediately.
//! 2. **Probe** — a HEAD request to `https://<hostname>` raced against the
//!    configured timeout; a response or redirect means the hostname is
//!    usable as-is.
//! 3. **Fallback** — the embedder's resolver function builds a lookup
//!    request; the first IP in its `{"ips": [...]}` body is cached and used.
//!
//! Every pipeline settles with a usable target. Transport and parse
//! failures degrade to the original hostname rather than erroring; the only
//! caller-visible error is resolving before configuration.

mod config;
mod engine;

pub use config::{FallbackFn, ResolverConfig};
pub use engine::{HostResolver, Resolution};
