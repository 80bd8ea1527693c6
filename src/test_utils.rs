use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database as SeaDatabase};

use crate::database::Database;

/// An in-memory database with every collection and index in place, but no named graph
/// and no data.
pub async fn test_db() -> Arc<Database> {
    // A single connection: every pooled connection would otherwise get its own
    // private in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = SeaDatabase::connect(opt).await.unwrap();

    migration::Migrator::up(&conn, None)
        .await
        .unwrap_or_else(|e| panic!("Failed to run migrations: {}", e));

    Arc::new(Database { conn })
}

/// An in-memory database provisioned and loaded with the built-in dataset, using a
/// fixed random seed for the playlist contents.
pub async fn seeded_db() -> Arc<Database> {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::collections::DEFAULT_GRAPH_NAME;
    use crate::provision::SchemaProvisioner;
    use crate::seed::{Dataset, Seeder};

    let db = test_db().await;
    SchemaProvisioner::new(db.clone())
        .ensure(DEFAULT_GRAPH_NAME)
        .await
        .unwrap();

    let now = chrono::Utc::now().timestamp_millis();
    let mut rng = StdRng::seed_from_u64(7);
    Seeder::new(db.clone())
        .run(&Dataset::builtin(now), &mut rng, now)
        .await
        .unwrap();

    db
}
