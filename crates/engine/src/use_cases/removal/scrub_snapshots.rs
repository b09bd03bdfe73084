//! Scrub snapshots use case.
//!
//! Removes every embedded snapshot of one canonical Loot or Monster from all
//! Rooms. Rooms are scrubbed one at a time and each scrub is idempotent, so
//! this can be re-run at any time to converge rooms a previous run missed.

use std::sync::Arc;

use jotunwiki_domain::{CanonicalRef, RoomId};

use crate::infrastructure::ports::{RepoError, RoomRepo};

/// Outcome of one scrub pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub canonical: CanonicalRef,
    /// Rooms that had at least one snapshot removed.
    pub scrubbed: Vec<RoomId>,
    /// Rooms whose scrub failed; they still hold snapshots.
    pub failed: Vec<RoomId>,
}

impl CascadeReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ScrubSnapshots {
    room_repo: Arc<dyn RoomRepo>,
}

impl ScrubSnapshots {
    pub fn new(room_repo: Arc<dyn RoomRepo>) -> Self {
        Self { room_repo }
    }

    /// Errors only when the holding rooms cannot be listed; per-room
    /// failures are collected into the report.
    pub async fn execute(&self, canonical: CanonicalRef) -> Result<CascadeReport, RepoError> {
        let holding = self.room_repo.list_holding(canonical).await?;

        let mut report = CascadeReport {
            canonical,
            scrubbed: Vec::new(),
            failed: Vec::new(),
        };

        for room_id in holding {
            match self.room_repo.scrub_snapshot(room_id, canonical).await {
                Ok(0) => {}
                Ok(_) => report.scrubbed.push(room_id),
                Err(e) => {
                    tracing::warn!(
                        room_id = %room_id,
                        canonical = %canonical,
                        error = %e,
                        "Failed to scrub snapshot from room"
                    );
                    report.failed.push(room_id);
                }
            }
        }

        Ok(report)
    }
}
