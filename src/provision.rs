use std::sync::Arc;

use chrono::Utc;
use color_eyre::{Result, eyre::Context};
use migration::{MigratorTrait, SchemaManager};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::collections::{Collection, music_graph_edge_definitions};
use crate::database::Database;
use crate::entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphStatus {
    Created,
    AlreadyExists,
    /// Graph creation failed; edges exist but are not grouped under a named graph
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub created_collections: Vec<Collection>,
    pub graph: GraphStatus,
}

/// Creates whatever part of the schema is missing. Never drops anything.
pub struct SchemaProvisioner {
    db: Arc<Database>,
}

impl SchemaProvisioner {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn ensure(&self, graph_name: &str) -> Result<ProvisionReport> {
        let missing = self.missing_collections().await?;

        log::debug!("Running database migrations");
        migration::Migrator::up(&self.db.conn, None)
            .await
            .context("Failed to run database migrations")?;

        // A collection dropped after its migration was recorded is not recreated by
        // `Migrator::up`; the migrations only use IF NOT EXISTS, so replay them.
        if !self.missing_collections().await?.is_empty() {
            log::warn!("Collections missing after migrations, re-applying schema");
            let manager = SchemaManager::new(&self.db.conn);
            for step in migration::Migrator::migrations() {
                step
                    .up(&manager)
                    .await
                    .context("Failed to re-apply schema")?;
            }
        }

        for collection in &missing {
            log::info!(
                "Created {:?} collection '{}'",
                collection.kind(),
                collection
            );
        }

        let graph = match self.ensure_graph(graph_name).await {
            Ok(true) => {
                log::info!("Created graph '{}'", graph_name);
                GraphStatus::Created
            }
            Ok(false) => {
                log::debug!("Graph '{}' already exists", graph_name);
                GraphStatus::AlreadyExists
            }
            Err(e) => {
                log::warn!(
                    "Could not create graph '{}', continuing without it: {:#}",
                    graph_name,
                    e
                );
                GraphStatus::Unavailable(format!("{:#}", e))
            }
        };

        Ok(ProvisionReport {
            created_collections: missing,
            graph,
        })
    }

    async fn missing_collections(&self) -> Result<Vec<Collection>> {
        let manager = SchemaManager::new(&self.db.conn);
        let mut missing = Vec::new();
        for collection in Collection::ALL {
            let exists = manager
                .has_table(collection.name())
                .await
                .context(format!("Failed to inspect collection '{}'", collection))?;
            if !exists {
                missing.push(collection);
            }
        }
        Ok(missing)
    }

    /// Returns whether the graph had to be created
    async fn ensure_graph(&self, name: &str) -> Result<bool> {
        let existing = entities::graph::Entity::find_by_id(name.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to look up graph")?;
        if existing.is_some() {
            return Ok(false);
        }

        let definitions = serde_json::to_string(&music_graph_edge_definitions())
            .context("Failed to encode edge definitions")?;

        entities::graph::ActiveModel {
            name: Set(name.to_string()),
            edge_definitions: Set(definitions),
            created_at: Set(Utc::now().timestamp_millis()),
        }
        .insert(&self.db.conn)
        .await
        .context("Failed to insert graph")?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::DEFAULT_GRAPH_NAME;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase};

    async fn empty_db() -> Arc<Database> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let conn = SeaDatabase::connect(opt).await.unwrap();
        Arc::new(Database { conn })
    }

    #[tokio::test]
    async fn test_ensure_creates_everything() {
        let db = empty_db().await;
        let provisioner = SchemaProvisioner::new(db.clone());

        let report = provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();

        assert_eq!(report.created_collections, Collection::ALL.to_vec());
        assert_eq!(report.graph, GraphStatus::Created);

        let graph = entities::graph::Entity::find_by_id(DEFAULT_GRAPH_NAME.to_string())
            .one(&db.conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graph.definitions().unwrap(), music_graph_edge_definitions());
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let db = empty_db().await;
        let provisioner = SchemaProvisioner::new(db.clone());

        provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();
        let report = provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();

        assert!(report.created_collections.is_empty());
        assert_eq!(report.graph, GraphStatus::AlreadyExists);
    }

    #[tokio::test]
    async fn test_ensure_recreates_dropped_collection() {
        let db = empty_db().await;
        let provisioner = SchemaProvisioner::new(db.clone());
        provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();

        db.conn
            .execute_unprepared("DROP TABLE rel_track_genre")
            .await
            .unwrap();

        let report = provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();
        assert_eq!(report.created_collections, vec![Collection::RelTrackGenre]);

        let manager = SchemaManager::new(&db.conn);
        assert!(manager.has_table("rel_track_genre").await.unwrap());
    }

    #[tokio::test]
    async fn test_graph_failure_is_not_fatal() {
        let db = empty_db().await;
        let provisioner = SchemaProvisioner::new(db.clone());
        migration::Migrator::up(&db.conn, None).await.unwrap();

        db.conn.execute_unprepared("DROP TABLE graphs").await.unwrap();

        let report = provisioner.ensure(DEFAULT_GRAPH_NAME).await.unwrap();
        assert!(report.created_collections.is_empty());
        assert!(matches!(report.graph, GraphStatus::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_custom_graph_name() {
        let db = empty_db().await;
        let provisioner = SchemaProvisioner::new(db.clone());

        provisioner.ensure("otherGraph").await.unwrap();

        let graphs = entities::graph::Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].name, "otherGraph");
    }
}
