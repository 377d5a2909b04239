//! Payload decoding errors

/// A structured payload carried by a backend event could not be decoded.
///
/// Payloads cross the bridge as JSON-encoded strings, so a malformed string is
/// only discovered by the receiver. The view logs these and drops the update.
#[derive(Debug, thiserror::Error)]
#[error("Malformed {event} payload: {source}")]
pub struct PayloadError {
    /// Name of the event whose payload failed to decode
    pub event: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl PayloadError {
    pub fn new(event: &'static str, source: serde_json::Error) -> Self {
        Self { event, source }
    }
}
