// Terminal capability seam. The workflow talks to a `Console`; the
// production implementation wires the dialoguer prompts and the raw-key
// picker onto one terminal handle, tests substitute a scripted double.

use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::catalog::{DocumentCatalog, DocumentRecord};
use crate::prompt::{self, ActionItem, PromptSpec};
use crate::select;

/// Interaction-surface failures. `Aborted` is the recoverable "go back"
/// from the picker; `Io` means the terminal itself failed and is fatal once
/// it reaches the controller.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("selection aborted")]
    Aborted,
    #[error("terminal input failed")]
    Io(#[from] std::io::Error),
}

/// Spinner handle around a blocking service call. The no-op form keeps
/// scripted consoles silent in tests.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    pub fn noop() -> Self {
        Spinner(None)
    }

    pub fn finish(self) {
        if let Some(bar) = self.0 {
            bar.finish_and_clear();
        }
    }
}

/// Everything the workflow needs from the terminal.
pub trait Console {
    fn input(&self, spec: &PromptSpec, default: &str) -> Result<String, UiError>;
    fn select_with_add(&self, spec: &PromptSpec, options: &[String]) -> Result<String, UiError>;
    fn pick_document(
        &self,
        catalog: &DocumentCatalog,
        label: &str,
    ) -> Result<DocumentRecord, UiError>;
    fn choose_action(&self, actions: &[ActionItem]) -> Result<usize, UiError>;
    fn show_details(&self, record: &DocumentRecord);
    fn info(&self, message: &str);
    fn spinner(&self, message: &str) -> Spinner;
}

/// Production console on the user's terminal.
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn input(&self, spec: &PromptSpec, default: &str) -> Result<String, UiError> {
        prompt::input(spec, default)
    }

    fn select_with_add(&self, spec: &PromptSpec, options: &[String]) -> Result<String, UiError> {
        prompt::run_select_with_add(options, |working| prompt::select_round(spec, working))
    }

    fn pick_document(
        &self,
        catalog: &DocumentCatalog,
        label: &str,
    ) -> Result<DocumentRecord, UiError> {
        select::pick(&self.term, catalog, label)
    }

    fn choose_action(&self, actions: &[ActionItem]) -> Result<usize, UiError> {
        prompt::choose_action(actions)
    }

    fn show_details(&self, record: &DocumentRecord) {
        println!("--------- Document ----------");
        for (key, value) in select::detail_fields(record) {
            println!("{}\t{}", style(format!("{key}:")).dim(), value);
        }
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn spinner(&self, message: &str) -> Spinner {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Spinner(Some(bar))
    }
}
