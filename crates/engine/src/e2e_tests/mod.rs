//! End-to-end HTTP tests.
//!
//! Each test builds the full App over a fresh SQLite file in a temp dir and
//! drives the axum router in-process with `tower::ServiceExt::oneshot`.

mod e2e_helpers;

pub use e2e_helpers::*;
