//! Client-side channel abstraction for realtime pub/sub services.
//!
//! A [`Channel`] represents one subscribed topic. It owns the listener
//! registry and event-name formatting; the socket itself lives behind the
//! [`Transport`] trait, which routes inbound events back into
//! [`Channel::handle_event`].

pub mod channel;
pub mod errors;
pub mod formatter;
pub mod protocol;
pub mod transport;

pub use channel::{Callback, Channel, ChannelOptions, ChannelState};
pub use errors::TransportError;
pub use formatter::EventFormatter;
pub use protocol::{events, ClientMessage};
pub use transport::Transport;
