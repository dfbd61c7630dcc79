//! Result engine: wire codec, connection handling and effect execution for
//! the result viewer.
mod channel;
mod connection;
mod sink;
mod wire;

pub use channel::ResultChannel;
pub use connection::{ChannelEmitter, ChannelEvent, ChannelHandle, CloseReason};
pub use sink::{NoScroll, SignalSink, Viewport};
pub use wire::{decode_frame, decode_outgoing, encode_frame, encode_signal, WireError, MAX_FRAME_LEN};
