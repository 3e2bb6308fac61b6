//! In-memory stand-in for the document-path backend.
//!
//! Serves the same HTTP contract as the production server so client tests can
//! run over real HTTP. State lives in a single `Backend` behind an `RwLock`
//! and is lost when the process exits.

mod error;
mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::BackendError;
pub use store::{Backend, User};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPath {
    pub id: Uuid,
    pub document_number: String,
    pub document_type: String,
    pub department: String,
    pub section: String,
    pub business_task: Option<String>,
    pub user_id: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub generated: bool,
    pub deleted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub code: String,
    pub name: String,
    pub sections: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub code: String,
    pub description: String,
    pub root_directory: Option<String>,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    pub type_code: String,
    pub user_id: String,
    pub task_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDocumentManual {
    pub document_number: String,
    pub type_code: String,
    pub file_path: String,
    pub user_id: String,
    pub task_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePath {
    pub new_path: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub type Db = Arc<RwLock<Backend>>;

/// Router over the seeded reference data.
pub fn app() -> Router {
    app_with(Backend::seeded())
}

pub fn app_with(backend: Backend) -> Router {
    let db: Db = Arc::new(RwLock::new(backend));
    Router::new()
        .route("/api/documents", get(list_documents).post(create_document_auto))
        .route("/api/documents/manual", post(create_document_manual))
        .route("/api/documents/search", get(search_documents))
        .route("/api/documents/number/{number}", get(get_document_by_number))
        .route("/api/documents/{id}", get(get_document).delete(delete_document))
        .route("/api/documents/{id}/path", put(update_document_path))
        .route("/api/departments", get(list_departments))
        .route("/api/document-types", get(list_document_types))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_documents(State(db): State<Db>) -> Json<Vec<DocumentPath>> {
    Json(db.read().await.list())
}

async fn create_document_auto(
    State(db): State<Db>,
    Json(input): Json<CreateDocument>,
) -> Result<(StatusCode, Json<DocumentPath>), BackendError> {
    let doc = db.write().await.create_auto(input)?;
    tracing::info!(number = %doc.document_number, "document created");
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn create_document_manual(
    State(db): State<Db>,
    Json(input): Json<CreateDocumentManual>,
) -> Result<(StatusCode, Json<DocumentPath>), BackendError> {
    let doc = db.write().await.create_manual(input)?;
    tracing::info!(number = %doc.document_number, "manual document registered");
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn search_documents(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<DocumentPath>> {
    Json(db.read().await.search(params.q.as_deref()))
}

async fn get_document_by_number(
    State(db): State<Db>,
    Path(number): Path<String>,
) -> Result<Json<DocumentPath>, BackendError> {
    db.read().await.get_by_number(&number).map(Json)
}

async fn get_document(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentPath>, BackendError> {
    db.read().await.get(id).map(Json)
}

async fn update_document_path(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePath>,
) -> Result<Json<DocumentPath>, BackendError> {
    db.write().await.update_path(id, input.new_path).map(Json)
}

async fn delete_document(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentPath>, BackendError> {
    let doc = db.write().await.delete(id)?;
    tracing::info!(number = %doc.document_number, "document logically deleted");
    Ok(Json(doc))
}

async fn list_departments(State(db): State<Db>) -> Json<Vec<Department>> {
    Json(db.read().await.departments())
}

async fn list_document_types(State(db): State<Db>) -> Json<Vec<DocumentType>> {
    Json(db.read().await.active_document_types())
}
