//! Core, DOM-free primitives and helpers for the Web UI.
pub mod media;
pub mod panel;
pub mod referral;
pub mod settings;
pub mod store;
pub mod toast;
