//! Client bindings for the document-path management backend.
//!
//! # Overview
//! Typed wrappers around the backend's HTTP API (create, read, update,
//! logically delete, search and list document paths) plus an observable
//! cache of reference data (departments and document types).
//!
//! # Design
//! - `DocumentClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse` and applies the status policy.
//! - `Transport` executes requests; `ReqwestTransport` is the network-backed
//!   implementation.
//! - `DocumentApi` composes the two into one async call per operation.
//! - `MetadataStore` caches reference data behind `tokio::sync::watch` cells.
//! - DTOs are defined independently from the mock-backend crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod metadata;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::DocumentApi;
pub use client::DocumentClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use metadata::MetadataStore;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    CreateDocumentManualRequest, CreateDocumentRequest, Department, DocumentPath, DocumentType,
    UpdatePathRequest,
};
