use crate::OutgoingSignal;

/// Side effects requested by [`crate::update`], executed by the caller in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a signal back over the connection the input arrived on.
    Emit(OutgoingSignal),
    /// Keep the newest output in view.
    ScrollToBottom,
}
