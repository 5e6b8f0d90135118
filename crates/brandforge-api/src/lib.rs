//! # brandforge-api
//!
//! HTTP API for brandforge: kit lifecycle, brand core/voice generation,
//! campaigns, caption packs, variants, and intelligence briefs.
//!
//! Handlers are thin; the orchestration semantics live in [`services`].
//! Every failure converts to a uniform `{ok:false, error}` body.

pub mod error;
pub mod handlers;
pub mod services;

pub use error::ApiError;
pub use handlers::{router, AppState};
pub use services::ServiceDeps;
