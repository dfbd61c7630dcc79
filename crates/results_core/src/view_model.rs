use serde_json::Value;

use crate::{Output, ResultSettings};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultListView {
    pub append_results: bool,
    pub rows: Vec<OutputRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub index: usize,
    pub mime_type: String,
    pub body: OutputBody,
}

/// How a row should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBody {
    Text(String),
    Html(String),
    /// Base64 image data, drawn as a placeholder by text front ends.
    Image { byte_len: usize },
    /// Anything without a known renderer, shown as pretty JSON.
    Json(String),
}

impl ResultListView {
    pub(crate) fn build(settings: ResultSettings, results: &[Output]) -> Self {
        Self {
            append_results: settings.append_results,
            rows: results
                .iter()
                .enumerate()
                .map(|(index, output)| OutputRow::build(index, output))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl OutputRow {
    fn build(index: usize, output: &Output) -> Self {
        let mime_type = output.mime_type().unwrap_or("application/json").to_owned();
        let body = match (mime_type.as_str(), output.payload()) {
            (mime, Some(value)) if mime.starts_with("image/") => OutputBody::Image {
                byte_len: value.as_str().map_or(0, str::len),
            },
            ("text/html", Some(value)) => OutputBody::Html(text_of(value)),
            (mime, Some(value)) if mime.starts_with("text/") => OutputBody::Text(text_of(value)),
            _ => OutputBody::Json(pretty(output.as_value())),
        };
        Self {
            index,
            mime_type,
            body,
        }
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        // Jupyter splits multi-line text into an array of lines.
        Value::Array(parts) if parts.iter().all(Value::is_string) => {
            parts.iter().filter_map(Value::as_str).collect()
        }
        other => pretty(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_follow_output_types() {
        let results = vec![
            Output::typed("text/plain", "hello"),
            Output::typed("text/html", "<b>hi</b>"),
            Output::typed("image/png", "iVBORw0KGgo="),
            Output::typed("text/plain", json!(["a\n", "b"])),
            Output::new(json!({"ename": "ValueError"})),
        ];
        let view = ResultListView::build(ResultSettings::default(), &results);

        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].body, OutputBody::Text("hello".into()));
        assert_eq!(view.rows[1].body, OutputBody::Html("<b>hi</b>".into()));
        assert_eq!(view.rows[2].body, OutputBody::Image { byte_len: 12 });
        assert_eq!(view.rows[3].body, OutputBody::Text("a\nb".into()));
        assert_eq!(view.rows[4].mime_type, "application/json");
        assert!(matches!(&view.rows[4].body, OutputBody::Json(text) if text.contains("ValueError")));
        assert_eq!(view.rows[4].index, 4);
    }

    #[test]
    fn building_twice_is_identical() {
        let results = vec![Output::typed("text/plain", "x")];
        let settings = ResultSettings {
            append_results: true,
        };
        assert_eq!(
            ResultListView::build(settings, &results),
            ResultListView::build(settings, &results)
        );
    }
}
