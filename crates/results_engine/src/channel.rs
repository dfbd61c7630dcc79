use std::sync::{Mutex, MutexGuard, PoisonError};

use notebook_logging::notebook_trace;
use results_core::{update, Effect, ResultListView, ResultSettings, Signal, ViewerState};

use crate::{SignalSink, Viewport};

/// Viewer-side handler for every signal of one connection.
///
/// The reduce and its effects run under one lock, so a `results` signal is
/// observed as clear, append, ack, scroll even when signals arrive on several
/// threads.
pub struct ResultChannel<S, V> {
    state: Mutex<ViewerState>,
    sink: S,
    viewport: V,
}

impl<S: SignalSink, V: Viewport> ResultChannel<S, V> {
    pub fn new(settings: ResultSettings, sink: S, viewport: V) -> Self {
        Self {
            state: Mutex::new(ViewerState::with_settings(settings)),
            sink,
            viewport,
        }
    }

    /// Apply `signal`; returns the new view when something visible changed.
    pub fn handle(&self, signal: Signal) -> Option<ResultListView> {
        let mut guard = self.lock();
        let settings = guard.settings();
        let state = std::mem::replace(&mut *guard, ViewerState::with_settings(settings));
        let (mut state, effects) = update(state, signal);
        let changed = state.consume_dirty();
        let view = changed.then(|| state.view());
        *guard = state;

        for effect in effects {
            self.run(effect);
        }
        view
    }

    pub fn view(&self) -> ResultListView {
        self.lock().view()
    }

    pub fn snapshot(&self) -> ViewerState {
        self.lock().clone()
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::Emit(signal) => {
                notebook_trace!("emit {}", signal.name());
                self.sink.emit(signal);
            }
            Effect::ScrollToBottom => self.viewport.scroll_to_bottom(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewerState> {
        // After a panic inside `update` the store is empty but keeps its settings.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
