use std::sync::Arc;

use crate::{Document, LineRange, Position, Selection};

/// Context flag toggled after every scan so the host can enable cell commands.
pub const HAS_CODE_CELLS_CONTEXT: &str = "notebook.document.hasCodeCells";

/// Host-assigned identifier of an open editor.
pub type EditorId = u64;

/// The slice of the editor host the scanner and navigator need.
///
/// Passed explicitly so that navigation can run against a fake editor in tests.
pub trait EditorHost {
    /// Document shown in the focused editor, if any.
    fn active_document(&self) -> Option<Arc<Document>>;

    /// Primary selection of the focused editor, if any.
    fn active_selection(&self) -> Option<Selection>;

    /// A visible editor currently showing `file_name`.
    fn visible_editor_for(&self, file_name: &str) -> Option<EditorId>;

    /// Replace all selections of `editor` with `selection`.
    fn set_selection(&mut self, editor: EditorId, selection: Selection);

    /// Scroll `editor` so that `range` is visible.
    fn reveal_range(&mut self, editor: EditorId, range: LineRange);

    /// Bring `editor` to the front.
    fn show_editor(&mut self, editor: EditorId);

    fn set_context_flag(&mut self, key: &str, value: bool);

    /// Cursor of the focused editor.
    fn cursor(&self) -> Option<Position> {
        self.active_selection().map(|selection| selection.start())
    }
}
