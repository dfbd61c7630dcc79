use std::sync::Arc;

use results_core::OutgoingSignal;

/// Where outgoing signals go; the connection in production, a recorder in tests.
pub trait SignalSink: Send + Sync {
    fn emit(&self, signal: OutgoingSignal);
}

/// Scrollable surface the result list is drawn into.
pub trait Viewport: Send + Sync {
    fn scroll_to_bottom(&self);
}

/// Viewport for front ends that always show the tail.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScroll;

impl Viewport for NoScroll {
    fn scroll_to_bottom(&self) {}
}

impl<T: SignalSink + ?Sized> SignalSink for Arc<T> {
    fn emit(&self, signal: OutgoingSignal) {
        (**self).emit(signal);
    }
}

impl<T: Viewport + ?Sized> Viewport for Arc<T> {
    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom();
    }
}
