//! Jotun's Lair Wiki engine library.
//!
//! This crate contains all server-side code for the wiki.
//!
//! ## Structure
//!
//! - `use_cases/` - Fan-out writes, dungeon views and lookups
//! - `infrastructure/` - Ports and the SQLite document store adapter
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end HTTP tests over a temporary SQLite store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
