//! Wire DTOs for the document-path API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! of the mock-backend crate. Classification codes (`department`, `section`,
//! `document_type`) stay plain strings on this side: the backend is free to
//! use single letters or multi-byte codes such as `りん議`, and the client only
//! carries them through. Integration tests catch any schema drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document path record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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
    /// `true` for auto-numbered documents, `false` for manually numbered ones.
    pub generated: bool,
    /// Logical deletion flag. Deleted records are kept by the backend.
    pub deleted: bool,
}

impl DocumentPath {
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// A department and the sections it contains, in backend order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub code: String,
    pub name: String,
    pub sections: Vec<String>,
}

impl Department {
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentType {
    pub code: String,
    pub description: String,
    pub root_directory: Option<String>,
    pub active: bool,
}

/// Request payload for creating a document with a server-assigned number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub type_code: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Request payload for registering a document under a caller-chosen number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDocumentManualRequest {
    pub document_number: String,
    pub type_code: String,
    pub file_path: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePathRequest {
    pub new_path: String,
}
