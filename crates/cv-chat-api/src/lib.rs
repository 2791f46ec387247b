//! Conversofy Chat API — library crate for the chat REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `cv-e2e-tests`) can reach `AppState`, `build_router` and the
//! intent resolver.

pub mod config;
pub mod error;
pub mod intent;
pub mod routes;
pub mod state;
pub mod theme_store;
