//! Reconcile snapshots use case.
//!
//! Finds embedded Loot/Monster snapshots whose canonical record was deleted
//! (tombstoned by the store) and scrubs them. Converges cascades left
//! incomplete by an earlier removal, including ones interrupted by a restart.
//! Snapshots of ids that never had a canonical record are left alone.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use jotunwiki_domain::{CanonicalRef, RoomId};

use crate::infrastructure::ports::{LootRepo, MonsterRepo, RepoError, RoomRepo};

use super::scrub_snapshots::ScrubSnapshots;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Deleted canonical records that still had snapshots.
    pub orphans: Vec<CanonicalRef>,
    pub scrubbed_rooms: usize,
    pub failed: Vec<(CanonicalRef, RoomId)>,
}

pub struct ReconcileSnapshots {
    room_repo: Arc<dyn RoomRepo>,
    loot_repo: Arc<dyn LootRepo>,
    monster_repo: Arc<dyn MonsterRepo>,
    scrub: Arc<ScrubSnapshots>,
}

impl ReconcileSnapshots {
    pub fn new(
        room_repo: Arc<dyn RoomRepo>,
        loot_repo: Arc<dyn LootRepo>,
        monster_repo: Arc<dyn MonsterRepo>,
        scrub: Arc<ScrubSnapshots>,
    ) -> Self {
        Self {
            room_repo,
            loot_repo,
            monster_repo,
            scrub,
        }
    }

    pub async fn execute(&self) -> Result<ReconcileReport, RepoError> {
        let deleted: HashSet<CanonicalRef> = self
            .loot_repo
            .list_deleted()
            .await?
            .into_iter()
            .map(CanonicalRef::Loot)
            .chain(
                self.monster_repo
                    .list_deleted()
                    .await?
                    .into_iter()
                    .map(CanonicalRef::Monster),
            )
            .collect();
        if deleted.is_empty() {
            tracing::debug!("Snapshot reconciliation found no deleted records");
            return Ok(ReconcileReport::default());
        }

        let orphans: BTreeSet<CanonicalRef> = self
            .room_repo
            .list_all()
            .await?
            .iter()
            .flat_map(|room| room.snapshot_refs())
            .filter(|r| deleted.contains(r))
            .collect();

        let mut report = ReconcileReport::default();
        for orphan in orphans {
            let cascade = self.scrub.execute(orphan).await?;
            report.scrubbed_rooms += cascade.scrubbed.len();
            report
                .failed
                .extend(cascade.failed.into_iter().map(|room_id| (orphan, room_id)));
            report.orphans.push(orphan);
        }

        if report.orphans.is_empty() {
            tracing::debug!("Snapshot reconciliation found no stale snapshots");
        } else {
            tracing::warn!(
                orphans = report.orphans.len(),
                scrubbed_rooms = report.scrubbed_rooms,
                failed = report.failed.len(),
                "Snapshot reconciliation scrubbed stale snapshots"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockLootRepo, MockMonsterRepo, MockRoomRepo};
    use jotunwiki_domain::{DungeonId, Loot, LootId, Monster, MonsterId, Room};

    fn room_holding(id: i64, loot: &[i64], monsters: &[i64]) -> Room {
        let mut room = Room::new(RoomId::new(id), format!("Room {id}"), DungeonId::new(1), "Lair");
        room.loot = loot.iter().map(|&l| Loot::new(LootId::new(l), "loot")).collect();
        room.monsters = monsters
            .iter()
            .map(|&m| Monster::new(MonsterId::new(m), "monster"))
            .collect();
        room
    }

    fn sweep(
        room_repo: MockRoomRepo,
        deleted_loot: Vec<LootId>,
        deleted_monsters: Vec<MonsterId>,
    ) -> ReconcileSnapshots {
        let mut loot_repo = MockLootRepo::new();
        loot_repo
            .expect_list_deleted()
            .returning(move || Ok(deleted_loot.clone()));
        let mut monster_repo = MockMonsterRepo::new();
        monster_repo
            .expect_list_deleted()
            .returning(move || Ok(deleted_monsters.clone()));

        let room_repo: Arc<dyn RoomRepo> = Arc::new(room_repo);
        ReconcileSnapshots::new(
            room_repo.clone(),
            Arc::new(loot_repo),
            Arc::new(monster_repo),
            Arc::new(ScrubSnapshots::new(room_repo)),
        )
    }

    #[tokio::test]
    async fn scrubs_only_snapshots_of_deleted_records() {
        let mut room_repo = MockRoomRepo::new();
        // Loot 7 never had a canonical record; it is not tombstoned.
        room_repo.expect_list_all().returning(|| {
            Ok(vec![
                room_holding(1, &[1, 5, 7], &[]),
                room_holding(2, &[5], &[4]),
            ])
        });
        room_repo
            .expect_list_holding()
            .returning(|canonical| match canonical {
                CanonicalRef::Loot(_) => Ok(vec![RoomId::new(1), RoomId::new(2)]),
                CanonicalRef::Monster(_) => Ok(vec![RoomId::new(2)]),
            });
        room_repo
            .expect_scrub_snapshot()
            .withf(|_, canonical| {
                *canonical == CanonicalRef::Loot(LootId::new(5))
                    || *canonical == CanonicalRef::Monster(MonsterId::new(4))
            })
            .times(3)
            .returning(|_, _| Ok(1));

        let report = sweep(
            room_repo,
            vec![LootId::new(5), LootId::new(8)],
            vec![MonsterId::new(4)],
        )
        .execute()
        .await
        .expect("report");

        assert_eq!(
            report.orphans,
            vec![
                CanonicalRef::Loot(LootId::new(5)),
                CanonicalRef::Monster(MonsterId::new(4)),
            ]
        );
        assert_eq!(report.scrubbed_rooms, 3);
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn snapshots_without_tombstones_are_left_alone() {
        let mut room_repo = MockRoomRepo::new();
        room_repo
            .expect_list_all()
            .returning(|| Ok(vec![room_holding(1, &[9], &[3])]));
        room_repo.expect_list_holding().never();
        room_repo.expect_scrub_snapshot().never();

        let report = sweep(room_repo, vec![LootId::new(2)], Vec::new())
            .execute()
            .await
            .expect("report");

        assert_eq!(report, ReconcileReport::default());
    }

    #[tokio::test]
    async fn nothing_deleted_skips_the_room_scan() {
        let mut room_repo = MockRoomRepo::new();
        room_repo.expect_list_all().never();

        let report = sweep(room_repo, Vec::new(), Vec::new())
            .execute()
            .await
            .expect("report");

        assert_eq!(report, ReconcileReport::default());
    }
}
