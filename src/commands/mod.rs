//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — trust command tree.
//! - `query.rs` — metadata.xml queries (`meta ...`).
//! - `release.rs` — fmt/test/lint and the release workflow.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod query;
pub mod release;

pub use admin::handle_trust_commands;
pub use query::handle_meta_commands;
pub use release::handle_release_commands;
