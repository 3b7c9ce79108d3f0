// Searchable document picker: a pure filter/cursor/window state machine,
// pure row and detail formatting, and a raw-key loop on the terminal that
// redraws in place.

use console::{style, Key, Term};

use crate::catalog::{DocumentCatalog, DocumentRecord};
use crate::text::fit;
use crate::ui::UiError;

/// Rows visible at once; the cursor scrolls the window past this.
pub const PAGE_SIZE: usize = 4;

const MARKER: &str = "\u{1F336}";

/// Lower-case and strip spaces, so filename matching ignores case and
/// whitespace.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A record is visible iff the normalized query is a substring of its
/// normalized filename.
pub fn matches(filename: &str, query: &str) -> bool {
    normalize(filename).contains(&normalize(query))
}

/// Filter, cursor and scroll window over an immutable record slice. The
/// cursor indexes the visible (filtered) list, not the full one.
pub struct PickerState<'a> {
    records: &'a [DocumentRecord],
    query: String,
    cursor: usize,
    offset: usize,
}

impl<'a> PickerState<'a> {
    pub fn new(records: &'a [DocumentRecord]) -> Self {
        Self {
            records,
            query: String::new(),
            cursor: 0,
            offset: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Indices of records matching the current query, in catalog order.
    pub fn visible(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, d)| matches(&d.filename, &self.query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.clamp();
    }

    pub fn move_down(&mut self) {
        let n = self.visible().len();
        if n == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % n;
        self.scroll();
    }

    pub fn move_up(&mut self) {
        let n = self.visible().len();
        if n == 0 {
            return;
        }
        self.cursor = (self.cursor + n - 1) % n;
        self.scroll();
    }

    /// The highlighted record, if anything matches the query.
    pub fn current(&self) -> Option<&'a DocumentRecord> {
        self.visible().get(self.cursor).map(|&i| &self.records[i])
    }

    /// The visible page: records with their highlight flag, at most
    /// `PAGE_SIZE` of them.
    pub fn window(&self) -> Vec<(&'a DocumentRecord, bool)> {
        let visible = self.visible();
        visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(PAGE_SIZE)
            .map(|(pos, &i)| (&self.records[i], pos == self.cursor))
            .collect()
    }

    fn clamp(&mut self) {
        let n = self.visible().len();
        if n == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        if self.cursor >= n {
            self.cursor = n - 1;
        }
        self.scroll();
    }

    fn scroll(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + PAGE_SIZE {
            self.offset = self.cursor + 1 - PAGE_SIZE;
        }
    }
}

/// One list row: fitted filename, fitted language pair, status. The
/// highlighted row gets the marker and the yellow language pair.
pub fn format_row(doc: &DocumentRecord, active: bool) -> String {
    let name = fit(&doc.filename, 30);
    let langs = fit(&format!("{} → {}", doc.source, doc.target), 15);
    if active {
        format!(
            "{MARKER} {} {} ({})",
            style(name).cyan(),
            style(langs).yellow(),
            style(doc.status).red()
        )
    } else {
        format!(
            "  {} {} ({})",
            style(name).cyan(),
            langs,
            style(doc.status).red()
        )
    }
}

/// Field name/value pairs for the detail panel. A document that has not
/// completed shows a dash.
pub fn detail_fields(doc: &DocumentRecord) -> Vec<(&'static str, String)> {
    vec![
        ("DocumentID", doc.document_id.clone()),
        ("Filename", doc.filename.clone()),
        ("Status", doc.status.to_string()),
        ("ModelID", doc.model_id.clone()),
        ("Source", doc.source.clone()),
        ("Target", doc.target.clone()),
        ("WordCount", doc.word_count.to_string()),
        ("CharacterCount", doc.character_count.to_string()),
        ("Created", doc.created.to_rfc3339()),
        (
            "Completed",
            doc.completed
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

fn render(state: &PickerState<'_>, label: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{} {}", style(label).bold(), state.query()));

    let window = state.window();
    if window.is_empty() {
        lines.push("  (no matching documents)".to_string());
    }
    for (doc, active) in &window {
        lines.push(format_row(doc, *active));
    }

    if let Some(doc) = state.current() {
        lines.push("--------- Document ----------".to_string());
        for (key, value) in detail_fields(doc) {
            lines.push(format!("{}\t{}", style(format!("{key}:")).dim(), value));
        }
    }
    lines
}

/// Run the picker on the terminal: type to filter, arrows to move, Enter to
/// select, Esc to abort. Aborting is recoverable; the caller decides what
/// "no selection" means. Returns the chosen record by value.
pub fn pick(
    term: &Term,
    catalog: &DocumentCatalog,
    label: &str,
) -> Result<DocumentRecord, UiError> {
    let mut state = PickerState::new(catalog.records());
    loop {
        let lines = render(&state, label);
        for line in &lines {
            term.write_line(line)?;
        }

        let key = match term.read_key() {
            Ok(key) => key,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                term.clear_last_lines(lines.len())?;
                return Err(UiError::Aborted);
            }
            Err(e) => return Err(UiError::Io(e)),
        };
        term.clear_last_lines(lines.len())?;

        match key {
            Key::ArrowUp => state.move_up(),
            Key::ArrowDown => state.move_down(),
            Key::Backspace => state.pop_char(),
            Key::Escape => return Err(UiError::Aborted),
            Key::Enter => {
                if let Some(doc) = state.current() {
                    let doc = doc.clone();
                    term.write_line(&format!(
                        "{MARKER} {} ({} → {})",
                        style(&doc.filename).cyan(),
                        doc.source,
                        doc.target
                    ))?;
                    return Ok(doc);
                }
            }
            Key::Char(c) if !c.is_control() => state.push_char(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DocumentStatus;
    use chrono::{TimeZone, Utc};

    fn doc(id: &str, filename: &str, secs: i64) -> DocumentRecord {
        DocumentRecord {
            document_id: id.to_string(),
            filename: filename.to_string(),
            status: DocumentStatus::Completed,
            model_id: "en-zh-TW".into(),
            source: "en".into(),
            target: "zh-TW".into(),
            word_count: 10,
            character_count: 55,
            created: Utc.timestamp_opt(secs, 0).unwrap(),
            completed: None,
        }
    }

    #[test]
    fn normalize_lowercases_and_strips_spaces() {
        assert_eq!(normalize("My Report.PDF"), "myreport.pdf");
        assert_eq!(normalize("  "), "");
    }

    #[test]
    fn matches_is_case_and_space_insensitive() {
        assert!(matches("Annual Report.pdf", "annualrep"));
        assert!(matches("Annual Report.pdf", "REPORT"));
        assert!(!matches("Annual Report.pdf", "notes"));
        // empty query matches everything
        assert!(matches("anything.txt", ""));
    }

    #[test]
    fn filter_narrows_the_visible_set() {
        let docs = vec![
            doc("A", "report.pdf", 3),
            doc("B", "notes.txt", 2),
            doc("C", "summary report.doc", 1),
        ];
        let mut state = PickerState::new(&docs);
        assert_eq!(state.visible(), [0, 1, 2]);

        for c in "rep".chars() {
            state.push_char(c);
        }
        assert_eq!(state.visible(), [0, 2]);
        assert_eq!(state.current().unwrap().document_id, "A");
    }

    #[test]
    fn cursor_clamps_when_the_filter_shrinks_below_it() {
        let docs = vec![
            doc("A", "alpha.pdf", 3),
            doc("B", "beta.pdf", 2),
            doc("C", "alpha-2.pdf", 1),
        ];
        let mut state = PickerState::new(&docs);
        state.move_down();
        state.move_down();
        assert_eq!(state.current().unwrap().document_id, "C");

        // "beta" leaves one visible record; cursor falls back onto it
        for c in "beta".chars() {
            state.push_char(c);
        }
        assert_eq!(state.current().unwrap().document_id, "B");

        // erasing the query restores the full list without moving past it
        for _ in 0.."beta".len() {
            state.pop_char();
        }
        assert_eq!(state.visible().len(), 3);
        assert!(state.current().is_some());
    }

    #[test]
    fn navigation_wraps_at_both_ends() {
        let docs = vec![doc("A", "a.pdf", 2), doc("B", "b.pdf", 1)];
        let mut state = PickerState::new(&docs);
        state.move_up();
        assert_eq!(state.current().unwrap().document_id, "B");
        state.move_down();
        assert_eq!(state.current().unwrap().document_id, "A");
    }

    #[test]
    fn window_holds_at_most_a_page_and_scrolls_with_the_cursor() {
        let docs: Vec<_> = (0..6)
            .map(|i| doc(&format!("D{i}"), &format!("file{i}.pdf"), 10 - i as i64))
            .collect();
        let mut state = PickerState::new(&docs);
        assert_eq!(state.window().len(), PAGE_SIZE);
        assert!(state.window()[0].1);

        for _ in 0..5 {
            state.move_down();
        }
        let window = state.window();
        assert_eq!(window.len(), PAGE_SIZE);
        // cursor on the last record, window shifted to the tail
        assert_eq!(window[PAGE_SIZE - 1].0.document_id, "D5");
        assert!(window[PAGE_SIZE - 1].1);

        // wrapping back to the top pulls the window back up
        state.move_down();
        assert_eq!(state.window()[0].0.document_id, "D0");
        assert!(state.window()[0].1);
    }

    #[test]
    fn no_match_leaves_no_current_record() {
        let docs = vec![doc("A", "report.pdf", 1)];
        let mut state = PickerState::new(&docs);
        state.push_char('z');
        assert!(state.current().is_none());
        assert!(state.window().is_empty());
    }

    #[test]
    fn detail_fields_show_dash_for_incomplete_documents() {
        let mut d = doc("A", "report.pdf", 1);
        let fields = detail_fields(&d);
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[9], ("Completed", "-".to_string()));

        d.completed = Some(Utc.timestamp_opt(99, 0).unwrap());
        let fields = detail_fields(&d);
        assert_ne!(fields[9].1, "-");
        assert_eq!(fields[0], ("DocumentID", "A".to_string()));
        assert_eq!(fields[6], ("WordCount", "10".to_string()));
    }

    #[test]
    fn query_rep_leaves_only_the_report_visible() {
        // catalog order is newest first already
        let docs = vec![doc("A", "report.pdf", 2), doc("B", "notes.txt", 1)];
        let mut state = PickerState::new(&docs);
        for c in "rep".chars() {
            state.push_char(c);
        }
        let visible = state.visible();
        assert_eq!(visible, [0]);
        assert_eq!(state.current().unwrap().document_id, "A");
    }
}
