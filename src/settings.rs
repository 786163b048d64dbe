use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::str::FromStr;

const API_KEY_SETTING: &str = "openai_api_key";

/// Key-value settings persisted in a local sqlite database. The only value
/// stored today is the API credential; presence of a credential gates the
/// chat loop.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pool: Pool<Sqlite>,
}

impl SettingsStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
            .create_if_missing(true);

        // A pooled ":memory:" database must keep a single long-lived
        // connection; every new connection would see a fresh empty database.
        let (max_connections, min_connections) = if db_path == ":memory:" { (1, 1) } else { (5, 0) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_tables().await?;
        Ok(store)
    }

    async fn init_tables(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    /// Overwrites any previous value; there is never more than one value per
    /// key.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The stored credential, if any. Blank values count as unset.
    pub async fn api_key(&self) -> Result<Option<String>> {
        Ok(self
            .get(API_KEY_SETTING)
            .await?
            .filter(|key| !key.trim().is_empty()))
    }

    pub async fn save_api_key(&self, key: &str) -> Result<()> {
        self.set(API_KEY_SETTING, key.trim()).await
    }
}
