//! SQLite schema - one table per document collection.
//!
//! Each table stores the whole document as JSON in `doc`, next to copies of
//! its immutable key(s). The key columns carry the uniqueness constraints;
//! `seq` fixes enumeration order to insertion order.
//!
//! Deleting a Loot or Monster row leaves a tombstone in `deleted_canonicals`
//! from inside the same statement (trigger). Re-inserting the id clears it.

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL UNIQUE,
        dungeon_id INTEGER NOT NULL,
        doc TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS rooms_dungeon_id ON rooms (dungeon_id)",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        doc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS loot (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id INTEGER NOT NULL UNIQUE,
        doc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monsters (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id INTEGER NOT NULL UNIQUE,
        doc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS deleted_canonicals (
        kind TEXT NOT NULL,
        id INTEGER NOT NULL,
        PRIMARY KEY (kind, id)
    )
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS loot_tombstone AFTER DELETE ON loot
    BEGIN
        INSERT OR IGNORE INTO deleted_canonicals (kind, id) VALUES ('loot', OLD.id);
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS loot_revived AFTER INSERT ON loot
    BEGIN
        DELETE FROM deleted_canonicals WHERE kind = 'loot' AND id = NEW.id;
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS monster_tombstone AFTER DELETE ON monsters
    BEGIN
        INSERT OR IGNORE INTO deleted_canonicals (kind, id) VALUES ('monster', OLD.id);
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS monster_revived AFTER INSERT ON monsters
    BEGIN
        DELETE FROM deleted_canonicals WHERE kind = 'monster' AND id = NEW.id;
    END
    "#,
];

/// Create tables and indexes. Idempotent; called once on startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("SQLite schema initialized (collections and unique keys ensured)");
    Ok(())
}
