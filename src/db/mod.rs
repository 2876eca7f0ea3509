use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::models::{Match, MatchStatus, NewMatch};

/// Storage capability the handlers depend on. Injected so the routes can be
/// exercised against a substitute store.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Persist a validated match with its derived status, returning the
    /// stored record with assigned id and creation time.
    async fn insert_match(&self, new: &NewMatch, status: MatchStatus) -> Result<Match, sqlx::Error>;

    /// Fetch matches ordered by creation time descending, newest first.
    async fn list_matches(&self, limit: i64) -> Result<Vec<Match>, sqlx::Error>;
}

pub type DynMatchStore = Arc<dyn MatchStore>;

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteMatchStore {
    pool: SqlitePool,
}

impl SqliteMatchStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteMatchStore { pool }
    }

    /// Create the matches table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS matches (
                   id INTEGER PRIMARY KEY AUTOINCREMENT,
                   sport TEXT NOT NULL,
                   home_team TEXT NOT NULL,
                   away_team TEXT NOT NULL,
                   start_time TEXT NOT NULL,
                   end_time TEXT NOT NULL,
                   home_score INTEGER,
                   away_score INTEGER,
                   status TEXT NOT NULL,
                   created_at TEXT NOT NULL
               )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MatchStore for SqliteMatchStore {
    async fn insert_match(&self, new: &NewMatch, status: MatchStatus) -> Result<Match, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"INSERT INTO matches
                   (sport, home_team, away_team, start_time, end_time,
                    home_score, away_score, status, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id, sport, home_team, away_team, start_time, end_time,
                         home_score, away_score, status, created_at"#,
        )
        .bind(&new.sport)
        .bind(&new.home_team)
        .bind(&new.away_team)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.home_score)
        .bind(new.away_score)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn list_matches(&self, limit: i64) -> Result<Vec<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"SELECT id, sport, home_team, away_team, start_time, end_time,
                      home_score, away_score, status, created_at
               FROM matches
               ORDER BY created_at DESC, id DESC
               LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
