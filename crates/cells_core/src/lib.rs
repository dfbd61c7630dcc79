//! Cell core: delimiter-based cell scanning and cell navigation over an
//! explicit editor host.
mod document;
mod host;
mod language;
mod navigator;
mod scanner;

pub use document::{Document, LineRange, Position, Selection};
pub use host::{EditorHost, EditorId, HAS_CODE_CELLS_CONTEXT};
pub use language::{LanguageConfig, LanguageError, LanguageRegistry, LanguageSpec};
pub use navigator::{locate, ActiveCell, CellNavigator};
pub use scanner::{get_cells, scan, Cell, CellScan};
