/// Zero-based line/column position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

/// Inclusive range of whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "line range start after end");
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.start..=self.end).contains(&position.line)
    }

    pub fn is_single_line(&self) -> bool {
        self.start == self.end
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Anchor/active pair; a caret when both are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            active: position,
        }
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

/// Snapshot of a text document as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    language_id: String,
    lines: Vec<String>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, language_id: impl Into<String>, text: &str) -> Self {
        Self::from_lines(
            file_name,
            language_id,
            text.lines().map(ToOwned::to_owned).collect(),
        )
    }

    pub fn from_lines(
        file_name: impl Into<String>,
        language_id: impl Into<String>,
        lines: Vec<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            language_id: language_id.into(),
            lines,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_inclusive() {
        let range = LineRange::new(2, 4);
        assert!(!range.contains(Position::new(1, 9)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(range.contains(Position::new(4, 7)));
        assert!(!range.contains(Position::new(5, 0)));
        assert_eq!(range.line_count(), 3);
    }

    #[test]
    fn selection_start_is_the_earlier_end() {
        let selection = Selection {
            anchor: Position::new(5, 1),
            active: Position::new(3, 4),
        };
        assert_eq!(selection.start(), Position::new(3, 4));
        assert!(!selection.is_empty());
        assert!(Selection::caret(Position::line_start(2)).is_empty());
    }

    #[test]
    fn document_keeps_lines() {
        let doc = Document::new("notes/analysis.py", "python", "# %%\nprint(1)\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(1), Some("print(1)"));
        assert_eq!(doc.line(2), None);
        assert_eq!(doc.file_name(), "notes/analysis.py");
    }
}
