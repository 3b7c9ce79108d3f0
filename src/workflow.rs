// The interactive loop: load the catalog, pick a document, pick an action,
// execute it, then start over from a fresh snapshot. The catalog is never
// patched locally after a mutation; the next iteration re-fetches it.

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{self, DocumentService, SubmitRequest};
use crate::prompt::{ActionItem, PromptSpec};
use crate::ui::{Console, UiError};

const ACTION_VIEW: i32 = 0;
const ACTION_DELETE: i32 = 1;
const ACTION_SUBMIT: i32 = 2;
const ACTION_CANCEL: i32 = 3;

fn actions() -> Vec<ActionItem> {
    vec![
        ActionItem::new("View details", ACTION_VIEW),
        ActionItem::new("Delete", ACTION_DELETE),
        ActionItem::new("Submit new document", ACTION_SUBMIT),
        ActionItem::new("Cancel", ACTION_CANCEL),
    ]
}

/// Run the console session until the user cancels, aborts the picker, or an
/// unrecoverable error bubbles up. Service and terminal failures are
/// returned to the caller; only `main` terminates the process.
pub fn run<S: DocumentService, C: Console>(service: &S, console: &C) -> Result<()> {
    loop {
        let spinner = console.spinner("Fetching documents...");
        let catalog = service.list();
        spinner.finish();
        let catalog = catalog.context("fetching documents")?;
        info!(count = catalog.len(), "documents fetched");

        if catalog.is_empty() {
            console.info("No documents have been submitted yet.");
            return Ok(());
        }

        let doc = match console.pick_document(&catalog, "Select a document") {
            Ok(doc) => doc,
            Err(UiError::Aborted) => {
                info!("selection aborted");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let menu = actions();
        let choice = console.choose_action(&menu)?;
        match menu[choice].value {
            ACTION_VIEW => console.show_details(&doc),
            ACTION_DELETE => {
                let spinner = console.spinner("Deleting document...");
                let result = service.delete(&doc.document_id);
                spinner.finish();
                result.context("deleting document")?;
                info!(document_id = %doc.document_id, "document deleted");
                console.info(&format!("Deleted {}", doc.filename));
            }
            ACTION_SUBMIT => submit(service, console)?,
            ACTION_CANCEL => return Ok(()),
            _ => unreachable!("action menu returned an unknown value"),
        }
        // loop: re-fetch so the view never shows stale records
    }
}

/// Collect a file path and a language pair, then upload. The extension is
/// checked before anything is asked of the service.
fn submit<S: DocumentService, C: Console>(service: &S, console: &C) -> Result<()> {
    let filename = console.input(
        &PromptSpec::new("File Name", "a file name is required"),
        "",
    )?;
    let content_type = api::content_type_for(&filename)?;

    let source = console.select_with_add(
        &PromptSpec::new("Source Language", "a source language is required"),
        &seed(&["en", "zh", "ja"]),
    )?;
    let target = console.select_with_add(
        &PromptSpec::new("Target Language", "a target language is required"),
        &seed(&["zh-TW"]),
    )?;

    let request = SubmitRequest {
        filename,
        content_type,
        source,
        target,
    };
    let spinner = console.spinner("Submitting document...");
    let created = service.submit(&request);
    spinner.finish();
    let created = created.context("submitting document")?;

    info!(document_id = %created.document_id, filename = %created.filename, "document submitted");
    console.info(&format!("Submitted as {}", created.document_id));
    Ok(())
}

fn seed(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
