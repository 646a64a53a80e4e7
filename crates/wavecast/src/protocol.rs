//! Wire-level protocol types shared between channels and transports.
//!
//! These define the reserved system event names and the client-originated
//! message envelope. The transport envelope itself (framing, heartbeats,
//! reconnect) is the transport implementation's concern.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reserved event names
// ---------------------------------------------------------------------------

/// System event names reserved by the wire protocol.
///
/// These are dispatched under their literal names and never pass through
/// the event-name formatter, unlike application events.
pub mod events {
    /// Delivered by the transport once a channel subscription is accepted.
    pub const SUBSCRIPTION_SUCCEEDED: &str = "subscription_succeeded";
    /// Delivered by the transport when a subscription fails, carrying a
    /// status payload.
    pub const ERROR: &str = "error";
}

// ---------------------------------------------------------------------------
// Client messages
// ---------------------------------------------------------------------------

/// A client-originated ("whisper") message handed to the transport.
///
/// The event name is carried raw, without namespace formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub event: String,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_serializes_flat() {
        let msg = ClientMessage {
            event: "typing".to_string(),
            data: serde_json::json!({"user": "a"}),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "typing", "data": {"user": "a"}})
        );
    }

    #[test]
    fn client_message_round_trips_arbitrary_data() {
        let text = r#"{"event":"client-move","data":{"x":3,"y":[1,2]}}"#;
        let msg: ClientMessage = serde_json::from_str(text).unwrap();
        assert_eq!(msg.event, "client-move");
        assert_eq!(msg.data["y"][1], 2);
    }
}
