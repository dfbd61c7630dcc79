use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Document, LineRange};

/// Python accepts the Spyder/VS Code marker as well as the IPython export markers.
const PYTHON_DELIMITER: &str = r"(?i)^(#\s*%%|#\s*<codecell>|#\s*In\[\d*?\]|#\s*In\[ \])(.*)";
const HASH_PERCENT_DELIMITER: &str = r"^#\s*%%(?P<title>.*)$";

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("invalid delimiter pattern for language {id}: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("language id must not be empty")]
    EmptyId,
}

/// User-supplied language entry, as read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub id: String,
    pub delimiter: String,
    pub line_comment: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Cell support for one language: the delimiter and what counts as executable.
#[derive(Debug, Clone)]
pub struct LanguageSpec {
    id: String,
    delimiter: Regex,
    line_comment: String,
    extensions: Vec<String>,
}

impl LanguageSpec {
    pub fn new(
        id: impl Into<String>,
        delimiter: &str,
        line_comment: impl Into<String>,
    ) -> Result<Self, LanguageError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(LanguageError::EmptyId);
        }
        let delimiter = Regex::new(delimiter).map_err(|source| LanguageError::InvalidPattern {
            id: id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            delimiter,
            line_comment: line_comment.into(),
            extensions: Vec::new(),
        })
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_config(config: &LanguageConfig) -> Result<Self, LanguageError> {
        Ok(Self::new(&config.id, &config.delimiter, &config.line_comment)?
            .with_extensions(config.extensions.iter().cloned()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn line_comment(&self) -> &str {
        &self.line_comment
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Title of the cell opened by `line`, or `None` if `line` is not a delimiter.
    ///
    /// When the pattern names a `title` group, that group alone supplies the
    /// title (empty if it did not match); otherwise the last group that took
    /// part in the match is used.
    pub fn delimiter_title(&self, line: &str) -> Option<String> {
        let captures = self.delimiter.captures(line)?;
        let title = if self.has_title_group() {
            captures.name("title")
        } else {
            captures.iter().skip(1).flatten().last()
        };
        Some(title.map(|m| m.as_str().trim().to_owned()).unwrap_or_default())
    }

    fn has_title_group(&self) -> bool {
        self.delimiter
            .capture_names()
            .any(|name| name == Some("title"))
    }

    pub fn is_delimiter(&self, line: &str) -> bool {
        self.delimiter.is_match(line)
    }

    /// Blank lines, comment lines and delimiters are not executable.
    pub fn is_executable(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() || self.is_delimiter(line) {
            return false;
        }
        self.line_comment.is_empty() || !trimmed.starts_with(self.line_comment.as_str())
    }

    /// First executable line of `range` after its delimiter line, or `range.start`.
    pub fn first_executable_line(&self, document: &Document, range: LineRange) -> usize {
        (range.start + 1..=range.end)
            .find(|&index| document.line(index).is_some_and(|line| self.is_executable(line)))
            .unwrap_or(range.start)
    }
}

/// Lookup table from language id (and file extension) to cell support.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, LanguageSpec>,
    extensions: HashMap<String, String>,
}

impl LanguageRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with Python, R and Julia support.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        let builtins = [
            ("python", PYTHON_DELIMITER, "#", &["py", "pyw", "ipy"][..]),
            ("r", HASH_PERCENT_DELIMITER, "#", &["r", "R"][..]),
            ("julia", HASH_PERCENT_DELIMITER, "#", &["jl"][..]),
        ];
        for (id, delimiter, comment, extensions) in builtins {
            match LanguageSpec::new(id, delimiter, comment) {
                Ok(spec) => registry.register(spec.with_extensions(extensions.iter().copied())),
                Err(err) => notebook_logging::notebook_error!("builtin language rejected: {}", err),
            }
        }
        registry
    }

    /// Add or replace a language.
    pub fn register(&mut self, spec: LanguageSpec) {
        self.extensions.retain(|_, id| id != spec.id());
        for ext in spec.extensions() {
            self.extensions.insert(ext.to_ascii_lowercase(), spec.id().to_owned());
        }
        self.languages.insert(spec.id().to_owned(), spec);
    }

    /// Register every configured language; stops at the first invalid entry.
    pub fn extend_from_config(&mut self, configs: &[LanguageConfig]) -> Result<(), LanguageError> {
        for config in configs {
            self.register(LanguageSpec::from_config(config)?);
        }
        Ok(())
    }

    pub fn get(&self, language_id: &str) -> Option<&LanguageSpec> {
        self.languages.get(language_id)
    }

    pub fn language_for_extension(&self, extension: &str) -> Option<&str> {
        self.extensions
            .get(&extension.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
