use std::sync::Arc;

use crate::database::Database;

pub struct AppState {
    pub db: Arc<Database>,
    /// Named graph used by traversal endpoints
    pub graph_name: String,
}
