//! Line-oriented frames: one JSON array `["name", payload]` per line.

use results_core::{signal_names, OutgoingSignal, Output, Signal};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Longest accepted line; a result batch carrying images can be large.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame is not a [name, payload] array")]
    NotAFrame,
    #[error("unknown signal {0}")]
    UnknownSignal(String),
    #[error("signal {0} requires a payload")]
    MissingPayload(&'static str),
    #[error("invalid payload for {signal}: {source}")]
    InvalidPayload {
        signal: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ClientIdentity {
    id: String,
}

fn split_frame(line: &str) -> Result<(String, Option<Value>), WireError> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Array(mut parts) = value else {
        return Err(WireError::NotAFrame);
    };
    if parts.is_empty() || parts.len() > 2 {
        return Err(WireError::NotAFrame);
    }
    let payload = (parts.len() == 2).then(|| parts.remove(1));
    let Value::String(name) = parts.remove(0) else {
        return Err(WireError::NotAFrame);
    };
    Ok((name, payload))
}

fn payload<T: DeserializeOwned>(
    signal: &'static str,
    payload: Option<Value>,
) -> Result<T, WireError> {
    let value = payload.ok_or(WireError::MissingPayload(signal))?;
    serde_json::from_value(value).map_err(|source| WireError::InvalidPayload { signal, source })
}

/// Decode a frame received from the result server.
pub fn decode_frame(line: &str) -> Result<Signal, WireError> {
    let (name, data) = split_frame(line)?;
    let signal = match name.as_str() {
        signal_names::CONNECT => Signal::Connect,
        signal_names::CLIENT_EXISTS => {
            let identity: ClientIdentity = payload(signal_names::CLIENT_EXISTS, data)?;
            Signal::ClientExists { id: identity.id }
        }
        signal_names::RESULTS => {
            Signal::Results(payload::<Vec<Output>>(signal_names::RESULTS, data)?)
        }
        signal_names::CLEAR_CLIENT_RESULTS => Signal::ClearClientResults,
        signal_names::SET_CLIENT_APPEND_RESULTS => {
            Signal::SetClientAppendResults(payload(signal_names::SET_CLIENT_APPEND_RESULTS, data)?)
        }
        _ => return Err(WireError::UnknownSignal(name)),
    };
    Ok(signal)
}

/// Encode a frame the viewer sends back.
pub fn encode_frame(signal: &OutgoingSignal) -> String {
    let frame = match signal {
        OutgoingSignal::ClientExists { id } => json!([signal.name(), { "id": id }]),
        OutgoingSignal::ResultsAck => json!([signal.name()]),
    };
    frame.to_string()
}

/// Server-side encoding of an incoming signal.
pub fn encode_signal(signal: &Signal) -> String {
    let frame = match signal {
        Signal::Connect | Signal::ClearClientResults => json!([signal.name()]),
        Signal::ClientExists { id } => json!([signal.name(), { "id": id }]),
        Signal::Results(batch) => json!([signal.name(), batch]),
        Signal::SetClientAppendResults(append) => json!([signal.name(), append]),
    };
    frame.to_string()
}

/// Server-side decoding of what the viewer sent.
pub fn decode_outgoing(line: &str) -> Result<OutgoingSignal, WireError> {
    let (name, data) = split_frame(line)?;
    match name.as_str() {
        signal_names::CLIENT_EXISTS => {
            let identity: ClientIdentity = payload(signal_names::CLIENT_EXISTS, data)?;
            Ok(OutgoingSignal::ClientExists { id: identity.id })
        }
        signal_names::RESULTS_ACK => Ok(OutgoingSignal::ResultsAck),
        _ => Err(WireError::UnknownSignal(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_incoming_signal() {
        assert_eq!(decode_frame(r#"["connect"]"#).unwrap(), Signal::Connect);
        assert_eq!(
            decode_frame(r#"["clientExists", {"id": "abc", "extra": 1}]"#).unwrap(),
            Signal::ClientExists { id: "abc".into() }
        );
        assert_eq!(
            decode_frame(r#"["results", [{"type": "text/plain", "value": "1"}]]"#).unwrap(),
            Signal::Results(vec![Output::typed("text/plain", "1")])
        );
        assert_eq!(
            decode_frame(r#"["clearClientResults"]"#).unwrap(),
            Signal::ClearClientResults
        );
        assert_eq!(
            decode_frame(r#"["setClientAppendResults", true]"#).unwrap(),
            Signal::SetClientAppendResults(true)
        );
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(matches!(decode_frame("{"), Err(WireError::Json(_))));
        assert!(matches!(decode_frame(r#"{"results": []}"#), Err(WireError::NotAFrame)));
        assert!(matches!(decode_frame("[]"), Err(WireError::NotAFrame)));
        assert!(matches!(decode_frame("[1, 2]"), Err(WireError::NotAFrame)));
        assert!(matches!(
            decode_frame(r#"["reboot"]"#),
            Err(WireError::UnknownSignal(name)) if name == "reboot"
        ));
        assert!(matches!(
            decode_frame(r#"["results"]"#),
            Err(WireError::MissingPayload("results"))
        ));
        assert!(matches!(
            decode_frame(r#"["setClientAppendResults", "yes"]"#),
            Err(WireError::InvalidPayload { signal: "setClientAppendResults", .. })
        ));
    }

    #[test]
    fn outgoing_frames_match_the_server_contract() {
        assert_eq!(
            encode_frame(&OutgoingSignal::ClientExists { id: "abc".into() }),
            r#"["clientExists",{"id":"abc"}]"#
        );
        assert_eq!(encode_frame(&OutgoingSignal::ResultsAck), r#"["results.ack"]"#);
        assert_eq!(
            decode_outgoing(r#"["results.ack"]"#).unwrap(),
            OutgoingSignal::ResultsAck
        );
    }
}
