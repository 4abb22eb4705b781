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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Client layer for the Justice airdrop frontend.
//!
//! Layout:
//! - `config.rs`: explicit client configuration and session identity
//! - `error.rs`: the single error type raised by the HTTP wrapper
//! - `http.rs`: request construction, auth headers, response normalization
//! - `resources.rs`: strict typed calls for every backend endpoint
//! - `fetchers.rs`: fail-soft accessors that degrade to defaults
//! - `poll.rs`: unread-count reconciliation shared by every poller
//! - `poller.rs`: tokio-driven poller for native targets

pub mod config;
pub mod error;
pub mod fetchers;
pub mod http;
pub mod poll;
#[cfg(not(target_arch = "wasm32"))]
pub mod poller;
pub mod resources;

pub use config::{ClientConfig, SessionIdentity};
pub use error::{ApiError, ApiResult};
pub use fetchers::Fetchers;
pub use http::{ApiBody, ApiClient};
pub use poll::{PollOutcome, PollState, PollerConfig, ToastNotice};
pub use resources::referral_link;
