// Document records as the translation service reports them, plus the
// ordered catalog snapshot the picker works from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a submitted document. The service may grow new states;
/// anything this client does not know collapses into `Unknown` instead of
/// failing the whole catalog parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Submitted,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Submitted => "submitted",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
            DocumentStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One document as listed by the service. Counts are absent on freshly
/// submitted documents, `completed` is absent until translation finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub filename: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub character_count: u64,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub completed: Option<DateTime<Utc>>,
}

/// Ordered snapshot of the remote document collection, most recent first.
/// Rebuilt on every load; never patched in place.
#[derive(Debug, Clone, Default)]
pub struct DocumentCatalog {
    documents: Vec<DocumentRecord>,
}

impl DocumentCatalog {
    /// Order the service's records by creation time, newest first. The sort
    /// is stable: batch-submitted documents sharing a timestamp keep the
    /// relative order the service returned them in.
    pub fn from_unordered(mut documents: Vec<DocumentRecord>) -> Self {
        documents.sort_by(|a, b| b.created.cmp(&a.created));
        Self { documents }
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
