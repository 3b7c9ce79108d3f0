// Blocking client for the translation service's document endpoints, behind
// the `DocumentService` trait so the workflow can run against a scripted
// service in tests.

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use serde::Deserialize;

use crate::catalog::{DocumentCatalog, DocumentRecord};
use crate::config::Settings;

/// The remote document collection: list it, delete from it, submit to it.
pub trait DocumentService {
    fn list(&self) -> Result<DocumentCatalog>;
    fn delete(&self, document_id: &str) -> Result<()>;
    fn submit(&self, request: &SubmitRequest) -> Result<DocumentRecord>;
}

/// A new document to upload for translation.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub filename: String,
    pub content_type: &'static str,
    pub source: String,
    pub target: String,
}

/// File types the service accepts, keyed by lower-case extension.
const ACCEPTED: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("rtf", "application/rtf"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
];

/// MIME type for a filename, by extension, case-insensitive. An extension
/// the service does not accept is an error naming it.
pub fn content_type_for(filename: &str) -> Result<&'static str> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    ACCEPTED
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| anyhow!("\".{ext}\" is not a supported content type"))
}

#[derive(Deserialize)]
struct DocumentPage {
    #[serde(default)]
    documents: Vec<DocumentRecord>,
}

/// Production `DocumentService`: Watson-style Language Translator v3
/// document endpoints, basic auth with the literal username `apikey`.
pub struct ApiClient {
    client: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder().build().context("building HTTP client")?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    fn documents_url(&self) -> String {
        format!("{}/v3/documents", self.settings.url)
    }

    fn check(res: Response, what: &str) -> Result<Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().unwrap_or_default();
        bail!("{what} failed: {status} - {body}");
    }
}

impl DocumentService for ApiClient {
    fn list(&self) -> Result<DocumentCatalog> {
        let res = self
            .client
            .get(self.documents_url())
            .query(&[("version", self.settings.version.as_str())])
            .basic_auth("apikey", Some(&self.settings.api_key))
            .send()
            .context("sending list request")?;
        let res = Self::check(res, "list")?;
        let page: DocumentPage = res.json().context("parsing documents response")?;
        Ok(DocumentCatalog::from_unordered(page.documents))
    }

    fn delete(&self, document_id: &str) -> Result<()> {
        let res = self
            .client
            .delete(format!("{}/{}", self.documents_url(), document_id))
            .query(&[("version", self.settings.version.as_str())])
            .basic_auth("apikey", Some(&self.settings.api_key))
            .send()
            .context("sending delete request")?;
        Self::check(res, "delete")?;
        Ok(())
    }

    fn submit(&self, request: &SubmitRequest) -> Result<DocumentRecord> {
        let file =
            File::open(&request.filename).with_context(|| format!("opening {}", request.filename))?;
        let name = Path::new(&request.filename)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();
        let part = multipart::Part::reader(file)
            .file_name(name)
            .mime_str(request.content_type)
            .context("building file part")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("source", request.source.clone())
            .text("target", request.target.clone());

        let res = self
            .client
            .post(self.documents_url())
            .query(&[("version", self.settings.version.as_str())])
            .basic_auth("apikey", Some(&self.settings.api_key))
            .multipart(form)
            .send()
            .context("sending submit request")?;
        let res = Self::check(res, "submit")?;
        res.json().context("parsing submit response")
    }
}
