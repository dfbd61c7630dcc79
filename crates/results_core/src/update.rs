use notebook_logging::notebook_debug;

use crate::{Effect, OutgoingSignal, Signal, ViewerState};

/// Pure update function: applies a signal to state and returns any effects.
///
/// For `results` the returned effects are the ack followed by the scroll, and
/// the state already holds the cleared-then-appended batch.
pub fn update(mut state: ViewerState, signal: Signal) -> (ViewerState, Vec<Effect>) {
    notebook_debug!("signal {}", signal.name());
    let effects = match signal {
        Signal::Connect => Vec::new(),
        Signal::ClientExists { id } => {
            vec![Effect::Emit(OutgoingSignal::ClientExists { id })]
        }
        Signal::Results(batch) => {
            if !state.settings().append_results {
                state.clear();
            }
            state.append(batch);
            vec![
                Effect::Emit(OutgoingSignal::ResultsAck),
                Effect::ScrollToBottom,
            ]
        }
        Signal::ClearClientResults => {
            state.clear();
            Vec::new()
        }
        Signal::SetClientAppendResults(append_results) => {
            state.set_append_mode(append_results);
            Vec::new()
        }
    };

    (state, effects)
}
