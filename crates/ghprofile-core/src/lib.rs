//! Lookup logic and presentation between `ghprofile-api` and the front ends
//! (CLI / TUI).
//!
//! - **[`ProfileLookupClient`]** runs one lookup as two dependent GETs
//!   (profile, then repositories) and publishes every [`UiState`]
//!   transition through a `watch` channel. Each lookup is tagged with a
//!   monotonic generation; results from a superseded lookup are dropped
//!   before publication.
//!
//! - **[`ViewModel`]** is the explicit render input: current state plus
//!   [`Theme`]. [`render::render_page`] turns it into a standalone HTML
//!   document, so rendering is testable without any UI.
//!
//! - **Domain model** ([`model`]): [`ProfileQuery`], [`ProfileRecord`],
//!   [`RepositoryRecord`], converted from wire types in [`convert`].

pub mod config;
pub mod convert;
pub mod error;
pub mod lookup;
pub mod model;
pub mod render;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::LookupConfig;
pub use error::{CoreError, LookupError};
pub use lookup::ProfileLookupClient;
pub use model::{ProfileQuery, ProfileRecord, RepositoryRecord};
pub use state::{Theme, UiState, ViewModel};
