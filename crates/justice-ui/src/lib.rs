#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Justice airdrop web UI.
//!
//! DOM-free state lives in [`core`] and is tested natively; the Yew shell,
//! timers, and DOM glue under `app/` and `components/` only build for wasm32.
//!
//! The host page is expected to provide `#root` for the app plus, optionally,
//! `#logo` (`<img>`), `#welcomeVideo` (`<video>`), and `#content-frame`
//! (`<iframe>`) for the media bootstrap.

pub mod core;
pub mod models;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
