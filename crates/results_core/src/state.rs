use crate::view_model::ResultListView;
use crate::Output;

/// Display settings; the app builds these from its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultSettings {
    pub append_results: bool,
}

/// Viewer-side store: display settings plus every output received so far.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerState {
    settings: ResultSettings,
    results: Vec<Output>,
    dirty: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ResultSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> ResultSettings {
        self.settings
    }

    pub fn results(&self) -> &[Output] {
        &self.results
    }

    pub fn view(&self) -> ResultListView {
        ResultListView::build(self.settings, &self.results)
    }

    pub fn clear(&mut self) {
        if !self.results.is_empty() {
            self.results.clear();
            self.dirty = true;
        }
    }

    pub fn append(&mut self, batch: Vec<Output>) {
        if !batch.is_empty() {
            self.results.extend(batch);
            self.dirty = true;
        }
    }

    pub fn set_append_mode(&mut self, append_results: bool) {
        if self.settings.append_results != append_results {
            self.settings.append_results = append_results;
            self.dirty = true;
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
