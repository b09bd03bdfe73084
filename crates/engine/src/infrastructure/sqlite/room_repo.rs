//! SQLite room repository.
//!
//! Rooms are the only documents written by more than one operation, so every
//! write here is a single UPDATE on one row: appends use `json_insert` at the
//! end of the array and scrubs use `json_remove` on one matched element.

use async_trait::async_trait;
use jotunwiki_domain::{CanonicalRef, DungeonId, Room, RoomHeader, RoomHint, RoomId};
use sqlx::{Row, SqlitePool};

use super::helpers::{count_to_u64, decode, encode, insert_error};
use crate::infrastructure::ports::{RepoError, RoomRepo};

pub struct SqliteRoomRepo {
    pool: SqlitePool,
}

impl SqliteRoomRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn array_path(canonical: CanonicalRef) -> String {
        format!("$.{}", canonical.room_field())
    }

    fn decode_rows(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Room>, RepoError> {
        rows.iter()
            .map(|row| {
                let doc: String = row
                    .try_get("doc")
                    .map_err(|e| RepoError::database("decode_room", e))?;
                decode::<Room>(&doc)
            })
            .collect()
    }
}

#[async_trait]
impl RoomRepo for SqliteRoomRepo {
    async fn list_headers(&self) -> Result<Vec<RoomHeader>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT room_id,
                   json_extract(doc, '$.room_name') AS room_name,
                   dungeon_id,
                   json_extract(doc, '$.dungeon_name') AS dungeon_name,
                   json_extract(doc, '$.dungeon_lore') AS dungeon_lore
            FROM rooms
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_room_headers", e))?;

        rows.iter()
            .map(|row| -> Result<RoomHeader, sqlx::Error> {
                let header = RoomHeader {
                    room_id: RoomId::new(row.try_get("room_id")?),
                    room_name: row.try_get("room_name")?,
                    dungeon_id: DungeonId::new(row.try_get("dungeon_id")?),
                    dungeon_name: row.try_get("dungeon_name")?,
                    dungeon_lore: row.try_get("dungeon_lore")?,
                };
                Ok(header)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepoError::database("list_room_headers", e))
    }

    async fn list_all(&self) -> Result<Vec<Room>, RepoError> {
        let rows = sqlx::query("SELECT doc FROM rooms ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_rooms", e))?;

        Self::decode_rows(rows)
    }

    async fn list_in_dungeon(&self, dungeon_id: DungeonId) -> Result<Vec<Room>, RepoError> {
        let rows = sqlx::query("SELECT doc FROM rooms WHERE dungeon_id = ? ORDER BY seq")
            .bind(dungeon_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_rooms_in_dungeon", e))?;

        Self::decode_rows(rows)
    }

    async fn get(&self, room_id: RoomId) -> Result<Option<Room>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM rooms WHERE room_id = ?")
            .bind(room_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_room", e))?;

        doc.as_deref().map(decode::<Room>).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_rooms", e))?;
        Ok(count_to_u64(count))
    }

    async fn insert(&self, room: &Room) -> Result<(), RepoError> {
        let doc = encode(room)?;

        sqlx::query("INSERT INTO rooms (room_id, dungeon_id, doc) VALUES (?, ?, ?)")
            .bind(room.room_id.get())
            .bind(room.dungeon_id.get())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(insert_error("Room", room.room_id))?;

        tracing::debug!(room_id = %room.room_id, "Inserted room");
        Ok(())
    }

    async fn append_hint(&self, room_id: RoomId, hint: &RoomHint) -> Result<(), RepoError> {
        let hint_json = encode(hint)?;

        let result = sqlx::query(
            "UPDATE rooms SET doc = json_insert(doc, '$.hints[#]', json(?)) WHERE room_id = ?",
        )
        .bind(hint_json)
        .bind(room_id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("append_room_hint", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Room", room_id));
        }
        Ok(())
    }

    async fn list_holding(&self, canonical: CanonicalRef) -> Result<Vec<RoomId>, RepoError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT room_id FROM rooms
            WHERE EXISTS (
                SELECT 1 FROM json_each(rooms.doc, ?)
                WHERE json_extract(value, '$.id') = ?
            )
            ORDER BY seq
            "#,
        )
        .bind(Self::array_path(canonical))
        .bind(canonical.raw_id())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_rooms_holding", e))?;

        Ok(ids.into_iter().map(RoomId::new).collect())
    }

    async fn scrub_snapshot(
        &self,
        room_id: RoomId,
        canonical: CanonicalRef,
    ) -> Result<usize, RepoError> {
        let path = Self::array_path(canonical);
        let mut removed = 0;

        // Each statement removes the first matching element; repeat until the
        // room holds none. Every iteration is atomic for this one document.
        loop {
            let result = sqlx::query(
                r#"
                UPDATE rooms
                SET doc = json_remove(doc, (
                    SELECT fullkey FROM json_each(rooms.doc, ?1)
                    WHERE json_extract(value, '$.id') = ?2
                    LIMIT 1
                ))
                WHERE room_id = ?3
                  AND EXISTS (
                    SELECT 1 FROM json_each(rooms.doc, ?1)
                    WHERE json_extract(value, '$.id') = ?2
                  )
                "#,
            )
            .bind(path.as_str())
            .bind(canonical.raw_id())
            .bind(room_id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("scrub_room_snapshot", e))?;

            if result.rows_affected() == 0 {
                break;
            }
            removed += 1;
        }

        if removed > 0 {
            tracing::debug!(room_id = %room_id, canonical = %canonical, removed, "Scrubbed snapshot");
        }
        Ok(removed)
    }
}
