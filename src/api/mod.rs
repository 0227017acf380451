//! HTTP surface for the catalog store.
//!
//! A thin mapping from routes onto the repository operations: validation
//! failures become 400, unknown ids become 404, creation returns 201, and
//! persistence problems surface as 500. CORS is permissive so a separate
//! browser frontend can consume the API directly.

use crate::models::{ListFilter, Record, RecordDraft, RecordId};
use crate::store::CatalogStore;
use crate::{Error, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router.
#[must_use]
pub fn router(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/records", get(list_records).post(create_record))
        .route(
            "/records/{id}",
            axum::routing::put(replace_record).delete(delete_record),
        )
        .route("/records/{id}/status", axum::routing::patch(patch_status))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Binds the listener and serves the router until shutdown.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(store: Arc<CatalogStore>, addr: SocketAddr) -> Result<()> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Persistence {
            operation: "bind".to_string(),
            cause: e.to_string(),
        })?;

    tracing::info!(%addr, "catalog API listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Persistence {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

/// Query parameters accepted by the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
    /// Case-insensitive title substring match.
    pub q: Option<String>,
}

impl From<ListParams> for ListFilter {
    fn from(params: ListParams) -> Self {
        Self {
            category: params.category,
            status: params.status,
            title_contains: params.q,
        }
    }
}

/// Body of the status patch route.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    /// The new status value.
    pub status: Option<String>,
}

/// Error wrapper mapping store failures onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Returns the HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::CorruptStore { .. } | Error::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

async fn list_records(
    State(store): State<Arc<CatalogStore>>,
    Query(params): Query<ListParams>,
) -> std::result::Result<Json<Vec<Record>>, ApiError> {
    let records = store.list(&params.into())?;
    Ok(Json(records))
}

async fn create_record(
    State(store): State<Arc<CatalogStore>>,
    Json(draft): Json<RecordDraft>,
) -> std::result::Result<(StatusCode, Json<Record>), ApiError> {
    let record = store.create(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace_record(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
    Json(draft): Json<RecordDraft>,
) -> std::result::Result<Json<Record>, ApiError> {
    let record = store.replace(RecordId::new(id), draft)?;
    Ok(Json(record))
}

async fn patch_status(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
    Json(body): Json<StatusBody>,
) -> std::result::Result<Json<Record>, ApiError> {
    let status = body
        .status
        .ok_or(Error::Validation(crate::ValidationError::MissingField(
            "status",
        )))?;
    let record = store.patch_status(RecordId::new(id), &status)?;
    Ok(Json(record))
}

async fn delete_record(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> std::result::Result<StatusCode, ApiError> {
    store.delete(RecordId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
