//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Network-facing steps live in plain async helpers generic
//! over the transport so they can run against a recording double in tests.

pub mod acts;
pub mod complaints;
pub mod device;
pub mod flows;
pub mod login;
pub mod requests;
pub(crate) mod shared;
pub mod stages;
pub mod statuses;
pub mod warehouse;
