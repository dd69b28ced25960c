//! Service layer.
//!
//! ARCHITECTURE
//! ============
//! Services hold the host's logic independent of Axum extractors; route
//! handlers stay thin and delegate here.

pub mod proxy;
