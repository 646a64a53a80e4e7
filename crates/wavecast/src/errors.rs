//! Error types for the transport boundary.
//!
//! Channel methods never fail synchronously: transport send failures are
//! logged and swallowed, and subscription failures arrive asynchronously
//! through the reserved `error` event.

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport not connected")]
    NotConnected,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("subscription rejected: {0}")]
    SubscriptionRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = TransportError::NotConnected;
        assert_eq!(err.to_string(), "transport not connected");

        let err = TransportError::SendFailed("broken pipe".into());
        assert_eq!(err.to_string(), "send failed: broken pipe");

        let err = TransportError::SubscriptionRejected("channel is private".into());
        assert_eq!(err.to_string(), "subscription rejected: channel is private");
    }
}
