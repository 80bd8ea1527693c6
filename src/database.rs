use color_eyre::{Result, eyre::Context};
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open the database at the given path, creating the file (and its parent
    /// directories) when it does not exist yet.
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create database directory: {}",
                parent.display()
            ))?;
        }

        let existed = path.exists();

        // mode=rwc creates the file when missing
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let conn = SeaDatabase::connect(opt)
            .await
            .context(format!("Failed to open database: {}", path.display()))?;

        if existed {
            log::info!("Database ready at: {}", path.display());
        } else {
            log::info!("Created database at: {}", path.display());
        }

        Ok(Database { conn })
    }

    /// Round-trip to the database, used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .ping()
            .await
            .context("Database did not answer ping")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("musicdb.sqlite");
        assert!(!path.exists());

        let db = Database::open(&path).await.unwrap();
        db.ping().await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("musicdb.sqlite");

        Database::open(&path).await.unwrap();
        let reopened = Database::open(&path).await.unwrap();
        reopened.ping().await.unwrap();
    }
}
