//! Result viewer core: pure signal reducer, result store and view-model.
mod effect;
mod output;
mod signal;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use output::Output;
pub use signal::{signal_names, OutgoingSignal, Signal};
pub use state::{ResultSettings, ViewerState};
pub use update::update;
pub use view_model::{OutputBody, OutputRow, ResultListView};
