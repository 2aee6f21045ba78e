//! # Core Application Services
//!
//! Everything Zyna needs that is neither navigation nor drawing.
//!
//! ```text
//!        ┌───────────────┐        ┌──────────────────┐
//!        │   config.rs   │        │    session.rs    │
//!        │ defaults→file │        │ ~/.zyna/         │
//!        │ →env→CLI      │        │   session.json   │
//!        └───────┬───────┘        └────────┬─────────┘
//!                │ ResolvedConfig          │ Option<Session>
//!                └───────────┬─────────────┘
//!                            ▼
//!                  flows::AppContext (initial step,
//!                  initial tab, display name)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: layered configuration, `ResolvedConfig`
//! - [`session`]: the signed-in session, persisted atomically

pub mod config;
pub mod session;
