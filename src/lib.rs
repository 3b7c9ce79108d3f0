// Library root
// -----------
// Interactive console for a remote document-translation service: list
// submitted documents in a searchable picker, inspect one, delete one, or
// submit a new file.
//
// Module responsibilities:
// - `config`: service credentials, loaded once at startup (file + env).
// - `catalog`: document records and the ordered catalog snapshot.
// - `text`: fixed-width text fitting for list rows.
// - `prompt`: validated input, the select-with-add loop, the action menu.
// - `select`: the searchable document picker.
// - `api`: the document-service trait and its blocking HTTP client.
// - `ui`: the terminal capability seam tying prompts and picker together.
// - `workflow`: the load → pick → act → reload loop.
pub mod api;
pub mod catalog;
pub mod config;
pub mod prompt;
pub mod select;
pub mod text;
pub mod ui;
pub mod workflow;
