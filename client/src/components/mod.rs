//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and shared widgets (banners, badges,
//! dialogs, the code input, the image viewer) while pages own data fetching.

pub mod banner;
pub mod confirm_dialog;
pub mod file_button;
pub mod layout;
pub mod lightbox;
pub mod otp_input;
pub mod status_badge;
pub mod toolbar;
