use notebook_logging::{notebook_debug, notebook_trace};

use crate::{get_cells, Cell, Document, EditorHost, LanguageRegistry, LineRange, Position, Selection};

/// Cell under the cursor and its neighbours in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCell {
    pub current: LineRange,
    pub previous: Option<LineRange>,
    pub next: Option<LineRange>,
}

/// Find the cell containing `position`.
pub fn locate(cells: &[Cell], position: Position) -> Option<ActiveCell> {
    let index = cells.iter().position(|cell| cell.range.contains(position))?;
    Some(ActiveCell {
        current: cells[index].range,
        previous: index
            .checked_sub(1)
            .map(|previous| cells[previous].range),
        next: cells.get(index + 1).map(|cell| cell.range),
    })
}

/// Cell commands bound to a language table.
#[derive(Debug, Clone, Copy)]
pub struct CellNavigator<'a> {
    languages: &'a LanguageRegistry,
}

impl<'a> CellNavigator<'a> {
    pub fn new(languages: &'a LanguageRegistry) -> Self {
        Self { languages }
    }

    /// Scan `document` and update the host's cell context flag.
    pub fn cells<H: EditorHost + ?Sized>(&self, host: &mut H, document: &Document) -> Vec<Cell> {
        get_cells(host, self.languages, document)
    }

    pub fn active_cell<H: EditorHost + ?Sized>(&self, host: &mut H) -> Option<ActiveCell> {
        let document = host.active_document()?;
        let cursor = host.cursor()?;
        let cells = self.cells(host, &document);
        locate(&cells, cursor)
    }

    pub fn go_to_previous_cell<H: EditorHost + ?Sized>(&self, host: &mut H) -> Option<Position> {
        let document = host.active_document()?;
        let target = self.active_cell(host)?.previous;
        self.advance_to_cell(host, &document, target)
    }

    pub fn go_to_next_cell<H: EditorHost + ?Sized>(&self, host: &mut H) -> Option<Position> {
        let document = host.active_document()?;
        let target = self.active_cell(host)?.next;
        self.advance_to_cell(host, &document, target)
    }

    /// Move the caret to the first executable line of `target`.
    ///
    /// Delimiter lines are comments, so a multi-line cell lands on its first
    /// line of code instead. Without a target, or without a visible editor for
    /// `document`, nothing on the host is touched.
    pub fn advance_to_cell<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        document: &Document,
        target: Option<LineRange>,
    ) -> Option<Position> {
        let target = target?;
        let editor = host.visible_editor_for(document.file_name())?;

        let line = if target.is_single_line() {
            target.start
        } else {
            match self.languages.get(document.language_id()) {
                Some(language) => language.first_executable_line(document, target),
                None => target.start,
            }
        };

        let caret = Position::line_start(line);
        notebook_trace!("advancing editor {} to line {}", editor, line);
        host.set_selection(editor, Selection::caret(caret));
        host.reveal_range(editor, LineRange::single(line));
        host.show_editor(editor);
        notebook_debug!("moved caret to {}:{}", document.file_name(), line);
        Some(caret)
    }
}
