//! The transport boundary consumed by channels.
//!
//! A transport owns the socket connection, its heartbeats, and its
//! reconnect policy; channels only hand it subscribe/unsubscribe/send
//! requests and receive inbound events back through
//! [`Channel::handle_event`](crate::channel::Channel::handle_event).

use crate::channel::Channel;
use crate::errors::TransportError;
use crate::protocol::ClientMessage;

/// The socket transport a channel subscribes through.
///
/// `subscribe` receives a clone of the channel itself so the transport can
/// route inbound events for `channel.name()` back into the channel's
/// dispatch; the clone is a cheap handle over the channel's shared state.
pub trait Transport: Send + Sync {
    /// Begin routing inbound events for the channel's name to
    /// `channel.handle_event`. Transports deduplicate by channel name, so
    /// repeated calls for the same channel are harmless.
    fn subscribe(&self, channel: Channel);

    /// Stop routing events for the channel and release any transport-side
    /// subscription state. Events already queued may still be delivered.
    fn unsubscribe(&self, channel: &Channel);

    /// Deliver a client-originated message in the context of the currently
    /// subscribed channel.
    fn send(&self, message: ClientMessage) -> Result<(), TransportError>;
}
