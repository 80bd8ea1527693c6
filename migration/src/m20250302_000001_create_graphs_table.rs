use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Named graph definitions; edge_definitions holds a JSON array of
        // { collection, from: [...], to: [...] }
        manager
            .create_table(
                Table::create()
                    .table(Graph::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Graph::Name).string().not_null().primary_key())
                    .col(ColumnDef::new(Graph::EdgeDefinitions).text().not_null())
                    .col(ColumnDef::new(Graph::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Graph::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Graph {
    #[sea_orm(iden = "graphs")]
    Table,
    Name,
    EdgeDefinitions,
    CreatedAt,
}
