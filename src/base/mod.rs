//! Base types and error handling.
//!
//! - [`ResolveError`]: configuration errors surfaced by the engine
//! - [`FetchError`]: transport failures reported by the request capability

pub mod error;

pub use error::{FetchError, ResolveError};
