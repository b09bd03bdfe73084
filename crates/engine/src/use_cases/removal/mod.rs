//! Canonical removal use cases.
//!
//! Deleting a Loot or Monster fans out into every Room holding a snapshot of
//! it. The scrub step is its own use case so it can be re-run on its own,
//! either directly or through the reconciliation sweep.

mod error;
mod reconcile_snapshots;
mod remove_canonical;
mod scrub_snapshots;

pub use error::RemovalError;
pub use reconcile_snapshots::{ReconcileReport, ReconcileSnapshots};
pub use remove_canonical::RemoveCanonical;
pub use scrub_snapshots::{CascadeReport, ScrubSnapshots};
