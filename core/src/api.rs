//! Async document API: build, execute, parse.
//!
//! Every method performs exactly one HTTP exchange. There is no retry and no
//! caching; errors go straight back to the caller.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::DocumentClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    CreateDocumentManualRequest, CreateDocumentRequest, Department, DocumentPath, DocumentType,
};

#[derive(Debug, Clone)]
pub struct DocumentApi<T> {
    client: DocumentClient,
    transport: T,
}

impl DocumentApi<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            DocumentClient::new(&config.base_url),
            ReqwestTransport::from_config(config),
        )
    }
}

impl<T: Transport> DocumentApi<T> {
    pub fn new(client: DocumentClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DocumentClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn create_document_auto(
        &self,
        input: &CreateDocumentRequest,
    ) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_create_document_auto(input)?;
        let resp = self.send("create_document_auto", req).await?;
        self.client.parse_create_document_auto(resp)
    }

    pub async fn create_document_manual(
        &self,
        input: &CreateDocumentManualRequest,
    ) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_create_document_manual(input)?;
        let resp = self.send("create_document_manual", req).await?;
        self.client.parse_create_document_manual(resp)
    }

    pub async fn get_document_by_id(&self, id: Uuid) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_get_document_by_id(id);
        let resp = self.send("get_document_by_id", req).await?;
        self.client.parse_get_document_by_id(resp)
    }

    pub async fn get_document_by_number(&self, number: &str) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_get_document_by_number(number);
        let resp = self.send("get_document_by_number", req).await?;
        self.client.parse_get_document_by_number(resp)
    }

    pub async fn update_document_path(
        &self,
        id: Uuid,
        new_path: &str,
    ) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_update_document_path(id, new_path)?;
        let resp = self.send("update_document_path", req).await?;
        self.client.parse_update_document_path(resp)
    }

    /// Logically delete a document. The returned record has `deleted` set.
    pub async fn delete_document(&self, id: Uuid) -> Result<DocumentPath, ApiError> {
        let req = self.client.build_delete_document(id);
        let resp = self.send("delete_document", req).await?;
        self.client.parse_delete_document(resp)
    }

    pub async fn search_documents(&self, query: &str) -> Result<Vec<DocumentPath>, ApiError> {
        let req = self.client.build_search_documents(query);
        let resp = self.send("search_documents", req).await?;
        self.client.parse_search_documents(resp)
    }

    pub async fn get_all_documents(&self) -> Result<Vec<DocumentPath>, ApiError> {
        let req = self.client.build_get_all_documents();
        let resp = self.send("get_all_documents", req).await?;
        self.client.parse_get_all_documents(resp)
    }

    pub async fn fetch_departments(&self) -> Result<Vec<Department>, ApiError> {
        let req = self.client.build_list_departments();
        let resp = self.send("fetch_departments", req).await?;
        self.client.parse_list_departments(resp)
    }

    pub async fn fetch_document_types(&self) -> Result<Vec<DocumentType>, ApiError> {
        let req = self.client.build_list_document_types();
        let resp = self.send("fetch_document_types", req).await?;
        self.client.parse_list_document_types(resp)
    }

    async fn send(&self, operation: &str, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(operation, method = req.method.as_str(), path = %req.path, "sending request");
        let resp = self.transport.execute(req).await.inspect_err(|e| {
            warn!(operation, error = %e, "request did not complete");
        })?;
        if !resp.is_success() {
            warn!(operation, status = resp.status, "backend returned error status");
        }
        Ok(resp)
    }
}
