pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_vertex_collections;
mod m20250301_000002_create_edge_collections;
mod m20250301_000003_create_indexes;
mod m20250302_000001_create_graphs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_vertex_collections::Migration),
            Box::new(m20250301_000002_create_edge_collections::Migration),
            Box::new(m20250301_000003_create_indexes::Migration),
            Box::new(m20250302_000001_create_graphs_table::Migration),
        ]
    }
}
