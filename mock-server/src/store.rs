//! In-memory backend state: documents, reference data and number counters.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::error::BackendError;
use crate::{CreateDocument, CreateDocumentManual, Department, DocumentPath, DocumentType};

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub department: String,
    pub section: String,
}

#[derive(Debug, Default)]
pub struct Backend {
    documents: Vec<DocumentPath>,
    departments: Vec<Department>,
    document_types: Vec<DocumentType>,
    users: Vec<User>,
    counters: HashMap<String, u32>,
}

impl Backend {
    pub fn new(
        departments: Vec<Department>,
        document_types: Vec<DocumentType>,
        users: Vec<User>,
    ) -> Self {
        Self {
            departments,
            document_types,
            users,
            ..Self::default()
        }
    }

    /// Reference data matching the production seed set.
    pub fn seeded() -> Self {
        let department = |code: &str, name: &str, sections: &[&str]| Department {
            code: code.to_string(),
            name: name.to_string(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
        };
        let doc_type = |code: &str, description: &str, root: Option<&str>, active: bool| {
            DocumentType {
                code: code.to_string(),
                description: description.to_string(),
                root_directory: root.map(str::to_string),
                active,
            }
        };
        let user = |id: &str, department: &str, section: &str| User {
            id: id.to_string(),
            department: department.to_string(),
            section: section.to_string(),
        };

        Self::new(
            vec![
                department("G", "総務", &["I", "T"]),
                department("K", "分析", &["I"]),
            ],
            vec![
                doc_type("A", "契約書", Some("/docs/contracts/"), true),
                doc_type("D", "設計書", Some("/docs/design/"), true),
                doc_type("りん議", "稟議書", Some("/docs/ringi/"), true),
                doc_type("X", "旧書式", None, false),
            ],
            vec![user("user001", "G", "I"), user("user002", "K", "I")],
        )
    }

    pub fn departments(&self) -> Vec<Department> {
        self.departments.clone()
    }

    pub fn active_document_types(&self) -> Vec<DocumentType> {
        self.document_types.iter().filter(|t| t.active).cloned().collect()
    }

    pub fn create_auto(&mut self, input: CreateDocument) -> Result<DocumentPath, BackendError> {
        let doc_type = self.active_type(&input.type_code)?.clone();
        let user = self.user(&input.user_id)?.clone();

        let now = Utc::now();
        let number = self.next_number(&doc_type.code, &user, now);
        let root = doc_type.root_directory.as_deref().unwrap_or("/docs/");
        let file_path = format!("{}/{number}.pdf", root.trim_end_matches('/'));

        let doc = DocumentPath {
            id: Uuid::new_v4(),
            document_number: number,
            document_type: doc_type.code,
            department: user.department,
            section: user.section,
            business_task: input.task_id.filter(|t| !t.is_empty()),
            user_id: user.id,
            file_path,
            created_at: now,
            updated_at: now,
            generated: true,
            deleted: false,
        };
        self.documents.push(doc.clone());
        Ok(doc)
    }

    pub fn create_manual(
        &mut self,
        input: CreateDocumentManual,
    ) -> Result<DocumentPath, BackendError> {
        let type_code = self.active_type(&input.type_code)?.code.clone();
        require_absolute(&input.file_path)?;
        if self.documents.iter().any(|d| d.document_number == input.document_number) {
            return Err(BackendError::DuplicateDocumentNumber(input.document_number));
        }
        let user = self.user(&input.user_id)?.clone();

        let now = Utc::now();
        let doc = DocumentPath {
            id: Uuid::new_v4(),
            document_number: input.document_number,
            document_type: type_code,
            department: user.department,
            section: user.section,
            business_task: input.task_id.filter(|t| !t.is_empty()),
            user_id: user.id,
            file_path: input.file_path,
            created_at: now,
            updated_at: now,
            generated: false,
            deleted: false,
        };
        self.documents.push(doc.clone());
        Ok(doc)
    }

    /// Lookups include logically deleted documents.
    pub fn get(&self, id: Uuid) -> Result<DocumentPath, BackendError> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| BackendError::DocumentNotFound(id.to_string()))
    }

    pub fn get_by_number(&self, number: &str) -> Result<DocumentPath, BackendError> {
        self.documents
            .iter()
            .find(|d| d.document_number == number)
            .cloned()
            .ok_or_else(|| BackendError::DocumentNotFound(number.to_string()))
    }

    pub fn update_path(
        &mut self,
        id: Uuid,
        new_path: String,
    ) -> Result<DocumentPath, BackendError> {
        require_absolute(&new_path)?;
        let doc = self.get_mut(id)?;
        if doc.deleted {
            return Err(BackendError::Validation("Cannot update deleted document".to_string()));
        }
        doc.file_path = new_path;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<DocumentPath, BackendError> {
        let doc = self.get_mut(id)?;
        if doc.deleted {
            return Err(BackendError::Validation("Document is already deleted".to_string()));
        }
        doc.deleted = true;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    /// Substring match on the document number, active documents only, in
    /// creation order. No query lists every active document.
    pub fn search(&self, query: Option<&str>) -> Vec<DocumentPath> {
        self.documents
            .iter()
            .filter(|d| !d.deleted)
            .filter(|d| query.is_none_or(|q| d.document_number.contains(q)))
            .cloned()
            .collect()
    }

    pub fn list(&self) -> Vec<DocumentPath> {
        self.search(None)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut DocumentPath, BackendError> {
        self.documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| BackendError::DocumentNotFound(id.to_string()))
    }

    fn active_type(&self, code: &str) -> Result<&DocumentType, BackendError> {
        self.document_types
            .iter()
            .find(|t| t.code == code && t.active)
            .ok_or_else(|| BackendError::InvalidTypeCode(code.to_string()))
    }

    fn user(&self, id: &str) -> Result<&User, BackendError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| BackendError::UserNotFound(id.to_string()))
    }

    /// `{type}{dept}{section}{YY}{MM}{seq:03}`, counted per type, department,
    /// section and month.
    fn next_number(&mut self, type_code: &str, user: &User, now: DateTime<Utc>) -> String {
        let (year, month) = (now.year(), now.month());
        let key = format!("{type_code}_{}_{}_{year:04}_{month:02}", user.department, user.section);
        let counter = self.counters.entry(key).or_insert(0);
        *counter += 1;
        format!(
            "{type_code}{}{}{:02}{month:02}{:03}",
            user.department,
            user.section,
            year % 100,
            counter
        )
    }
}

fn require_absolute(path: &str) -> Result<(), BackendError> {
    if Path::new(path).is_absolute() {
        Ok(())
    } else {
        Err(BackendError::RelativePathNotAllowed)
    }
}
