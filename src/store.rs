use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app_dirs::AppDirs;
use crate::difficulty::DifficultyScore;
use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS phrases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT,
    language TEXT,
    difficulty INTEGER,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// A persisted phrase; `difficulty` is `None` until scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRecord {
    pub id: i64,
    pub content: Option<String>,
    pub language: Option<String>,
    pub difficulty: Option<i64>,
}

/// Storage the batch driver reads unscored phrases from and writes scores to
pub trait PhraseStore {
    /// Every record whose difficulty is unset, oldest first
    fn unscored(&self) -> Result<Vec<PhraseRecord>>;

    fn set_difficulty(&mut self, id: i64, score: DifficultyScore) -> Result<()>;

    fn count_unscored(&self) -> Result<u64>;
}

/// SQLite backed phrase table
#[derive(Debug)]
pub struct SqlitePhraseStore {
    conn: Connection,
}

impl SqlitePhraseStore {
    /// Open the default database under `$HOME/.local/state/phrasediff`
    pub fn open_default() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("phrasediff.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening phrase database");
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_phrases_difficulty ON phrases(difficulty)",
            [],
        )?;
        Ok(SqlitePhraseStore { conn })
    }

    /// Insert a phrase, returning its id
    pub fn insert_phrase(
        &self,
        content: Option<&str>,
        language: Option<&str>,
        difficulty: Option<i64>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO phrases (content, language, difficulty) VALUES (?1, ?2, ?3)",
            params![content, language, difficulty],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<PhraseRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, content, language, difficulty FROM phrases WHERE id = ?1",
                [id],
                Self::map_record,
            )
            .optional()?;
        Ok(record)
    }

    pub fn count(&self) -> Result<u64> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM phrases", [], |row| row.get(0))?;
        Ok(total as u64)
    }

    fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PhraseRecord> {
        Ok(PhraseRecord {
            id: row.get(0)?,
            content: row.get(1)?,
            language: row.get(2)?,
            difficulty: row.get(3)?,
        })
    }
}

impl PhraseStore for SqlitePhraseStore {
    fn unscored(&self) -> Result<Vec<PhraseRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, content, language, difficulty
            FROM phrases
            WHERE difficulty IS NULL
            ORDER BY id
            "#,
        )?;

        let records = stmt
            .query_map([], Self::map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn set_difficulty(&mut self, id: i64, score: DifficultyScore) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE phrases SET difficulty = ?1 WHERE id = ?2",
            params![score.value(), id],
        )?;
        if updated == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows.into());
        }
        Ok(())
    }

    fn count_unscored(&self) -> Result<u64> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM phrases WHERE difficulty IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }
}
