//! Remove canonical use case.
//!
//! Deletes a canonical Loot or Monster and cascades the deletion into every
//! Room holding a snapshot of it. The canonical delete happens first and is
//! not reversible; a cascade that does not reach every room is reported as
//! [`RemovalError::IncompleteCascade`] after the canonical record is gone.

use std::sync::Arc;

use jotunwiki_domain::{CanonicalRef, Loot, LootId, Monster, MonsterId};

use crate::infrastructure::ports::{LootRepo, MonsterRepo};

use super::error::RemovalError;
use super::scrub_snapshots::ScrubSnapshots;

pub struct RemoveCanonical {
    loot_repo: Arc<dyn LootRepo>,
    monster_repo: Arc<dyn MonsterRepo>,
    scrub: Arc<ScrubSnapshots>,
}

impl RemoveCanonical {
    pub fn new(
        loot_repo: Arc<dyn LootRepo>,
        monster_repo: Arc<dyn MonsterRepo>,
        scrub: Arc<ScrubSnapshots>,
    ) -> Self {
        Self {
            loot_repo,
            monster_repo,
            scrub,
        }
    }

    pub async fn delete_loot(&self, id: LootId) -> Result<Loot, RemovalError> {
        let loot = self
            .loot_repo
            .take(id)
            .await?
            .ok_or(RemovalError::LootNotFound(id))?;

        self.cascade(CanonicalRef::Loot(id)).await?;
        Ok(loot)
    }

    pub async fn delete_monster(&self, id: MonsterId) -> Result<Monster, RemovalError> {
        let monster = self
            .monster_repo
            .take(id)
            .await?
            .ok_or(RemovalError::MonsterNotFound(id))?;

        self.cascade(CanonicalRef::Monster(id)).await?;
        Ok(monster)
    }

    async fn cascade(&self, canonical: CanonicalRef) -> Result<(), RemovalError> {
        let report = match self.scrub.execute(canonical).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(
                    canonical = %canonical,
                    error = %e,
                    "Canonical record deleted but holding rooms could not be listed"
                );
                return Err(RemovalError::IncompleteCascade {
                    canonical,
                    failed_rooms: Vec::new(),
                    detail: e.to_string(),
                });
            }
        };

        if !report.is_complete() {
            tracing::error!(
                canonical = %canonical,
                failed_rooms = ?report.failed,
                scrubbed_rooms = report.scrubbed.len(),
                "Canonical record deleted but some rooms still hold snapshots"
            );
            return Err(RemovalError::IncompleteCascade {
                canonical,
                detail: format!("{} room(s) not scrubbed", report.failed.len()),
                failed_rooms: report.failed,
            });
        }

        tracing::info!(
            canonical = %canonical,
            scrubbed_rooms = report.scrubbed.len(),
            "Canonical record deleted"
        );
        Ok(())
    }
}
