use notebook_logging::notebook_debug;

use crate::{Document, EditorHost, LanguageRegistry, LineRange, HAS_CODE_CELLS_CONTEXT};

/// One executable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub range: LineRange,
    pub title: String,
}

/// Result of one scan pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellScan {
    pub cells: Vec<Cell>,
    /// `false` when the language has no delimiter registered.
    pub supported: bool,
}

impl CellScan {
    pub fn has_code_cells(&self) -> bool {
        !self.cells.is_empty()
    }
}

/// Partition `lines` into cells using the delimiter registered for `language_id`.
///
/// Lines before the first delimiter belong to no cell; the last cell always
/// ends on the last line.
pub fn scan<S: AsRef<str>>(
    registry: &LanguageRegistry,
    language_id: &str,
    lines: &[S],
) -> CellScan {
    let Some(language) = registry.get(language_id) else {
        notebook_debug!("no cell support for language {}", language_id);
        return CellScan::default();
    };

    let mut cells: Vec<Cell> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let Some(title) = language.delimiter_title(line.as_ref()) else {
            continue;
        };
        if let Some(previous) = cells.last_mut() {
            previous.range.end = index - 1;
        }
        cells.push(Cell {
            range: LineRange::single(index),
            title,
        });
    }

    if let Some(last) = cells.last_mut() {
        last.range.end = lines.len() - 1;
    }

    notebook_debug!("scanned {} cells ({} lines, {})", cells.len(), lines.len(), language_id);
    CellScan {
        cells,
        supported: true,
    }
}

/// Scan `document` and publish whether it has cells through the host context flag.
pub fn get_cells<H: EditorHost + ?Sized>(
    host: &mut H,
    registry: &LanguageRegistry,
    document: &Document,
) -> Vec<Cell> {
    let result = scan(registry, document.language_id(), document.lines());
    host.set_context_flag(HAS_CODE_CELLS_CONTEXT, result.has_code_cells());
    result.cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageSpec;

    fn registry() -> LanguageRegistry {
        let mut registry = LanguageRegistry::empty();
        registry.register(LanguageSpec::new("python", r"^# %%(.*)$", "#").unwrap());
        registry
    }

    #[test]
    fn two_cells_with_titles() {
        let lines = ["# %%", "print(1)", "# %% second", "print(2)"];
        let result = scan(&registry(), "python", &lines);

        assert!(result.supported);
        assert_eq!(
            result.cells,
            vec![
                Cell {
                    range: LineRange::new(0, 1),
                    title: String::new(),
                },
                Cell {
                    range: LineRange::new(2, 3),
                    title: "second".into(),
                },
            ]
        );
    }

    #[test]
    fn preamble_before_first_delimiter_is_not_a_cell() {
        let lines = ["import os", "", "# %% body", "x = 1", "y = 2"];
        let result = scan(&registry(), "python", &lines);
        assert_eq!(result.cells.len(), 1);
        assert_eq!(result.cells[0].range, LineRange::new(2, 4));
    }

    #[test]
    fn adjacent_delimiters_produce_single_line_cells() {
        let lines = ["# %% a", "# %% b", "# %% c"];
        let ranges: Vec<_> = scan(&registry(), "python", &lines)
            .cells
            .into_iter()
            .map(|cell| cell.range)
            .collect();
        assert_eq!(
            ranges,
            vec![LineRange::single(0), LineRange::single(1), LineRange::single(2)]
        );
    }

    #[test]
    fn empty_document_and_unknown_language() {
        let empty: [&str; 0] = [];
        let result = scan(&registry(), "python", &empty);
        assert!(result.supported);
        assert!(!result.has_code_cells());

        let result = scan(&registry(), "cobol", &["# %%", "x"]);
        assert!(!result.supported);
        assert!(result.cells.is_empty());
    }

    #[test]
    fn document_without_delimiters_has_no_cells() {
        let result = scan(&registry(), "python", &["x = 1", "y = 2"]);
        assert!(result.supported);
        assert!(result.cells.is_empty());
    }

    #[test]
    fn repeated_scans_are_identical() {
        let lines = ["# %% one", "a", "# %% two", "b", "# %% three"];
        let registry = registry();
        let first = scan(&registry, "python", &lines);
        let second = scan(&registry, "python", &lines);
        assert_eq!(first, second);
        assert_eq!(first.cells.len(), 3);
    }
}
