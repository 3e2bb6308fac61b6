//! Stateless HTTP request builder and response parser for the document API.
//!
//! # Design
//! `DocumentClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (usually `DocumentApi`) executes the round-trip.
//!
//! Error messages follow two policies. Write operations surface the `message`
//! field of a JSON error body and fall back to a fixed string; read operations
//! always report a fixed string and ignore the body. Callers already depend on
//! those exact strings, so the split is kept as is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateDocumentManualRequest, CreateDocumentRequest, Department, DocumentPath, DocumentType,
    UpdatePathRequest,
};

pub const CREATE_FAILED: &str = "Failed to create document";
pub const NOT_FOUND: &str = "Document not found";
pub const UPDATE_PATH_FAILED: &str = "Failed to update document path";
pub const DELETE_FAILED: &str = "Failed to delete document";
pub const SEARCH_FAILED: &str = "Search failed";
pub const LIST_FAILED: &str = "Failed to fetch documents";
pub const DEPARTMENTS_FAILED: &str = "Failed to fetch departments";
pub const DOCUMENT_TYPES_FAILED: &str = "Failed to fetch document types";

/// How a non-2xx response becomes an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorPolicy {
    /// The body's `message` field if present, otherwise the fallback.
    ServerMessage(&'static str),
    /// Always the given text; the body is not inspected.
    Fixed(&'static str),
}

/// Synchronous, stateless client for the document API.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    base_url: String,
}

impl DocumentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // -- documents ---------------------------------------------------------

    pub fn build_create_document_auto(
        &self,
        input: &CreateDocumentRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/documents".to_string(), input)
    }

    pub fn build_create_document_manual(
        &self,
        input: &CreateDocumentManualRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/documents/manual".to_string(), input)
    }

    pub fn build_get_document_by_id(&self, id: Uuid) -> HttpRequest {
        self.bare_request(HttpMethod::Get, format!("/api/documents/{id}"))
    }

    /// The number is percent-encoded as a single path segment, so `A/B`
    /// becomes `A%2FB`.
    pub fn build_get_document_by_number(&self, number: &str) -> HttpRequest {
        self.bare_request(
            HttpMethod::Get,
            format!("/api/documents/number/{}", urlencoding::encode(number)),
        )
    }

    pub fn build_update_document_path(
        &self,
        id: Uuid,
        new_path: &str,
    ) -> Result<HttpRequest, ApiError> {
        let input = UpdatePathRequest {
            new_path: new_path.to_string(),
        };
        self.json_request(HttpMethod::Put, format!("/api/documents/{id}/path"), &input)
    }

    pub fn build_delete_document(&self, id: Uuid) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, format!("/api/documents/{id}"))
    }

    pub fn build_search_documents(&self, query: &str) -> HttpRequest {
        self.bare_request(
            HttpMethod::Get,
            format!("/api/documents/search?q={}", urlencoding::encode(query)),
        )
    }

    pub fn build_get_all_documents(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/api/documents".to_string())
    }

    pub fn parse_create_document_auto(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::ServerMessage(CREATE_FAILED))
    }

    pub fn parse_create_document_manual(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::ServerMessage(CREATE_FAILED))
    }

    pub fn parse_get_document_by_id(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(NOT_FOUND))
    }

    pub fn parse_get_document_by_number(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(NOT_FOUND))
    }

    pub fn parse_update_document_path(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::ServerMessage(UPDATE_PATH_FAILED))
    }

    pub fn parse_delete_document(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentPath, ApiError> {
        parse_json(response, ErrorPolicy::ServerMessage(DELETE_FAILED))
    }

    pub fn parse_search_documents(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DocumentPath>, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(SEARCH_FAILED))
    }

    pub fn parse_get_all_documents(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DocumentPath>, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(LIST_FAILED))
    }

    // -- reference data ----------------------------------------------------

    pub fn build_list_departments(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/api/departments".to_string())
    }

    pub fn build_list_document_types(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/api/document-types".to_string())
    }

    pub fn parse_list_departments(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Department>, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(DEPARTMENTS_FAILED))
    }

    pub fn parse_list_document_types(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DocumentType>, ApiError> {
        parse_json(response, ErrorPolicy::Fixed(DOCUMENT_TYPES_FAILED))
    }

    fn bare_request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(
    response: HttpResponse,
    policy: ErrorPolicy,
) -> Result<T, ApiError> {
    check_status(&response, policy)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to `ApiError::Status` under the given policy.
fn check_status(response: &HttpResponse, policy: ErrorPolicy) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = match policy {
        ErrorPolicy::Fixed(text) => text.to_string(),
        ErrorPolicy::ServerMessage(fallback) => {
            server_message(&response.body).unwrap_or_else(|| fallback.to_string())
        }
    };
    Err(ApiError::Status {
        status: response.status,
        message,
    })
}

/// Non-empty string `message` field of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
