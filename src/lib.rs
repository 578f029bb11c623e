//! Logic Links / EnWise front-end core.
//!
//! - `orchestrator`: quiz, chat and offline-pack requests with per-feature failure policy
//! - `responder`: keyword-triggered canned replies used when the backend is unreachable
//! - `view`: the UI affordances the orchestrator drives
//! - `store`: saved offline study packs
//! - `routes`: the local host that serves the page and exposes the affordances

pub mod backend;
pub mod canned;
pub mod chat;
pub mod config;
pub mod domain;
pub mod error;
pub mod guard;
pub mod orchestrator;
pub mod protocol;
pub mod responder;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
pub mod view;
