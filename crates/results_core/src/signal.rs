use crate::Output;

/// Names used on the wire for every signal.
pub mod signal_names {
    pub const CONNECT: &str = "connect";
    pub const CLIENT_EXISTS: &str = "clientExists";
    pub const RESULTS: &str = "results";
    pub const RESULTS_ACK: &str = "results.ack";
    pub const CLEAR_CLIENT_RESULTS: &str = "clearClientResults";
    pub const SET_CLIENT_APPEND_RESULTS: &str = "setClientAppendResults";
}

/// Signals received from the result server.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Connection established.
    Connect,
    /// Server asks the client to confirm its identity.
    ClientExists { id: String },
    /// A batch of outputs to display.
    Results(Vec<Output>),
    /// Drop everything shown so far.
    ClearClientResults,
    /// Switch between appending and replacing batches.
    SetClientAppendResults(bool),
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Connect => signal_names::CONNECT,
            Signal::ClientExists { .. } => signal_names::CLIENT_EXISTS,
            Signal::Results(_) => signal_names::RESULTS,
            Signal::ClearClientResults => signal_names::CLEAR_CLIENT_RESULTS,
            Signal::SetClientAppendResults(_) => signal_names::SET_CLIENT_APPEND_RESULTS,
        }
    }
}

/// Signals the viewer sends back to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingSignal {
    /// Echo of the identity handshake, carrying only the id.
    ClientExists { id: String },
    /// One per received `results` batch; the server waits for it before sending more.
    ResultsAck,
}

impl OutgoingSignal {
    pub fn name(&self) -> &'static str {
        match self {
            OutgoingSignal::ClientExists { .. } => signal_names::CLIENT_EXISTS,
            OutgoingSignal::ResultsAck => signal_names::RESULTS_ACK,
        }
    }
}
