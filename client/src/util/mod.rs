//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! clock) from page and component logic to improve reuse and testability.

pub mod auth;
pub mod clock;
pub mod storage;
pub mod timer;
