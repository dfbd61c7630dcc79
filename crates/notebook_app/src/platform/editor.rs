use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cells_core::{Document, EditorHost, EditorId, LanguageRegistry, LineRange, Position, Selection};

const FILE_EDITOR_ID: EditorId = 1;
const PLAIN_TEXT: &str = "plaintext";

/// A single file opened on the command line, acting as the focused editor.
#[derive(Debug)]
pub(crate) struct FileEditor {
    document: Arc<Document>,
    selection: Selection,
    revealed: Option<LineRange>,
    context: HashMap<String, bool>,
}

impl FileEditor {
    pub(crate) fn open(
        path: &Path,
        language: Option<&str>,
        registry: &LanguageRegistry,
    ) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path.to_string_lossy().into_owned();
        Ok(Self::from_text(file_name, &text, language, registry))
    }

    pub(crate) fn from_text(
        file_name: String,
        text: &str,
        language: Option<&str>,
        registry: &LanguageRegistry,
    ) -> Self {
        let language_id = language
            .map(ToOwned::to_owned)
            .or_else(|| {
                Path::new(&file_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| registry.language_for_extension(ext))
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_else(|| PLAIN_TEXT.to_owned());

        Self {
            document: Arc::new(Document::new(file_name, language_id, text)),
            selection: Selection::caret(Position::default()),
            revealed: None,
            context: HashMap::new(),
        }
    }

    pub(crate) fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Put the caret at the start of `line` (0-based).
    pub(crate) fn place_cursor(&mut self, line: usize) {
        self.selection = Selection::caret(Position::line_start(line));
    }

    pub(crate) fn revealed(&self) -> Option<LineRange> {
        self.revealed
    }

    pub(crate) fn context_flag(&self, key: &str) -> Option<bool> {
        self.context.get(key).copied()
    }
}

impl EditorHost for FileEditor {
    fn active_document(&self) -> Option<Arc<Document>> {
        Some(Arc::clone(&self.document))
    }

    fn active_selection(&self) -> Option<Selection> {
        Some(self.selection)
    }

    fn visible_editor_for(&self, file_name: &str) -> Option<EditorId> {
        (self.document.file_name() == file_name).then_some(FILE_EDITOR_ID)
    }

    fn set_selection(&mut self, _editor: EditorId, selection: Selection) {
        self.selection = selection;
    }

    fn reveal_range(&mut self, _editor: EditorId, range: LineRange) {
        self.revealed = Some(range);
    }

    fn show_editor(&mut self, _editor: EditorId) {}

    fn set_context_flag(&mut self, key: &str, value: bool) {
        self.context.insert(key.to_owned(), value);
    }
}
