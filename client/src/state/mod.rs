//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `acts`, `gallery`, etc.) so pages can
//! depend on small focused models. Every model here is plain data with pure
//! transitions; pages wrap them in `RwSignal`s.

pub mod acts;
pub mod auth;
pub mod banner;
pub mod cooldown;
pub mod filters;
pub mod gallery;
pub mod inflight;
pub mod otp;
pub mod status;
