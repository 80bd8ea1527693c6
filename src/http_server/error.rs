use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::services::CatalogError;

// A generic error report
// Produced via `Err(some_err).wrap_err("Some context")`
// or `Err(color_eyre::eyre::Report::new(SomeError))`
pub struct Report(color_eyre::Report);

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<E> From<E> for Report
where
    E: Into<color_eyre::Report>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn status_of(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::NotFound { .. } | CatalogError::GraphNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Conflict { .. } => StatusCode::CONFLICT,
        CatalogError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
}

// Tell axum how to convert `Report` into a response.
impl IntoResponse for Report {
    fn into_response(self) -> Response<Body> {
        let err = self.0;

        if let Some(catalog_err) = err.downcast_ref::<CatalogError>() {
            let status = status_of(catalog_err);
            log::debug!("{}: {}", status, catalog_err);
            return (status, Json(json!({ "detail": catalog_err.to_string() }))).into_response();
        }

        log::error!("{err:?}");

        // Fallback
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Something went wrong" })),
        )
            .into_response()
    }
}
