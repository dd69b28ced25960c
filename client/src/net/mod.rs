//! Networking modules for the repair-tracking REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport-neutral request model and error type, `api`
//! the typed per-entity operations, `types` the wire schema, and `gloo` the
//! browser fetch transport.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod gloo;
pub mod http;
pub mod types;
#[cfg(test)]
pub(crate) mod testing;
