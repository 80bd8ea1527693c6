use sea_orm::entity::prelude::*;

use crate::collections::EdgeDefinition;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "graphs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub edge_definitions: String, // JSON array of EdgeDefinition
    pub created_at: i64,
}

impl Model {
    pub fn definitions(&self) -> Result<Vec<EdgeDefinition>, serde_json::Error> {
        serde_json::from_str(&self.edge_definitions)
    }
}

impl ActiveModelBehavior for ActiveModel {}
