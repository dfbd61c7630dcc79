use std::fmt;
use std::future::Future;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use notebook_logging::{notebook_debug, notebook_info, notebook_warn};
use results_core::{OutgoingSignal, Signal};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc as async_mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

use crate::wire::{decode_frame, encode_frame, MAX_FRAME_LEN};
use crate::SignalSink;

/// What the connection thread reports to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Signal(Signal),
    Closed(CloseReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The server closed the stream.
    EndOfStream,
    ConnectFailed(String),
    Transport(String),
    /// Every emitter was dropped.
    Stopped,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::EndOfStream => write!(f, "server closed the connection"),
            CloseReason::ConnectFailed(reason) => write!(f, "connect failed: {reason}"),
            CloseReason::Transport(reason) => write!(f, "transport error: {reason}"),
            CloseReason::Stopped => write!(f, "stopped"),
        }
    }
}

/// Queues outgoing signals onto the connection.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    out_tx: async_mpsc::UnboundedSender<OutgoingSignal>,
}

impl SignalSink for ChannelEmitter {
    fn emit(&self, signal: OutgoingSignal) {
        if self.out_tx.send(signal).is_err() {
            notebook_debug!("connection already closed, outgoing signal dropped");
        }
    }
}

/// One long-lived connection to a result server, driven on its own thread.
pub struct ChannelHandle {
    emitter: ChannelEmitter,
    event_rx: mpsc::Receiver<ChannelEvent>,
}

impl ChannelHandle {
    /// Connect to `addr` over TCP.
    pub fn connect(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        Self::start(MAX_FRAME_LEN, move || async move {
            notebook_info!("connecting to {}", addr);
            TcpStream::connect(addr).await
        })
    }

    /// Drive an already-open stream.
    pub fn spawn<IO>(io: IO) -> Self
    where
        IO: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        Self::spawn_with_max_frame_len(io, MAX_FRAME_LEN)
    }

    /// Like [`ChannelHandle::spawn`], skipping incoming lines longer than `max_frame_len`.
    pub fn spawn_with_max_frame_len<IO>(io: IO, max_frame_len: usize) -> Self
    where
        IO: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        Self::start(max_frame_len, move || async move { Ok(io) })
    }

    fn start<F, Fut, IO>(max_frame_len: usize, open: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = io::Result<IO>>,
        IO: AsyncRead + AsyncWrite + Unpin,
    {
        let (out_tx, out_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = event_tx.send(ChannelEvent::Closed(CloseReason::Transport(
                        err.to_string(),
                    )));
                    return;
                }
            };
            runtime.block_on(async move {
                match open().await {
                    Ok(io) => run_connection(io, max_frame_len, out_rx, event_tx).await,
                    Err(err) => {
                        notebook_warn!("connection failed: {}", err);
                        let _ = event_tx.send(ChannelEvent::Closed(CloseReason::ConnectFailed(
                            err.to_string(),
                        )));
                    }
                }
            });
        });

        Self {
            emitter: ChannelEmitter { out_tx },
            event_rx,
        }
    }

    pub fn emitter(&self) -> ChannelEmitter {
        self.emitter.clone()
    }

    pub fn emit(&self, signal: OutgoingSignal) {
        self.emitter.emit(signal);
    }

    pub fn try_recv(&self) -> Option<ChannelEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event; `None` once the connection thread is gone.
    pub fn recv(&self) -> Option<ChannelEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ChannelEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_connection<IO>(
    io: IO,
    max_frame_len: usize,
    mut out_rx: async_mpsc::UnboundedReceiver<OutgoingSignal>,
    event_tx: mpsc::Sender<ChannelEvent>,
) where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, writer) = tokio::io::split(io);
    let mut frames_in = FramedRead::new(reader, LinesCodec::new_with_max_length(max_frame_len));
    let mut frames_out = FramedWrite::new(writer, LinesCodec::new());

    if event_tx.send(ChannelEvent::Signal(Signal::Connect)).is_err() {
        return;
    }

    let reason = loop {
        tokio::select! {
            line = frames_in.next() => match line {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match decode_frame(&line) {
                        Ok(signal) => {
                            if event_tx.send(ChannelEvent::Signal(signal)).is_err() {
                                break CloseReason::Stopped;
                            }
                        }
                        Err(err) => notebook_warn!("dropping frame: {}", err),
                    }
                }
                // The codec discards the rest of the long line and resumes at the next one.
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    notebook_warn!("dropping frame longer than {} bytes", max_frame_len);
                }
                Some(Err(LinesCodecError::Io(err))) => break CloseReason::Transport(err.to_string()),
                None => break CloseReason::EndOfStream,
            },
            outgoing = out_rx.recv() => match outgoing {
                Some(signal) => {
                    if let Err(err) = frames_out.send(encode_frame(&signal)).await {
                        break CloseReason::Transport(err.to_string());
                    }
                }
                None => break CloseReason::Stopped,
            },
        }
    };

    notebook_info!("connection closed: {}", reason);
    let _ = event_tx.send(ChannelEvent::Closed(reason));
}
