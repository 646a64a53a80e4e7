//! One subscribed topic on the realtime service.
//!
//! A [`Channel`] mediates between application event-handling code and the
//! socket [`Transport`]: it formats and dispatches inbound events to
//! registered callbacks, and forwards subscribe/unsubscribe/whisper
//! requests outward. Cloning a `Channel` yields a cheap handle over the
//! same shared state, which is how the transport holds onto it for
//! routing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::formatter::EventFormatter;
use crate::protocol::{events, ClientMessage};
use crate::transport::Transport;

/// A listener invoked with the dispatched event name and its payload.
///
/// Callbacks are `Arc`ed so [`Channel::stop_listening`] can compare pointer
/// identity: keep a clone of the `Arc` you registered if you intend to
/// remove that specific registration later.
pub type Callback = Arc<dyn Fn(&str, &Value) + Send + Sync>;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-channel configuration.
///
/// `namespace` scopes application event names (see
/// [`EventFormatter`](crate::formatter::EventFormatter)); everything else a
/// transport might care about rides in `extra`. Options are read once at
/// channel construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelOptions {
    /// Namespace prepended to application event names. Empty or absent
    /// means no prefixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Transport-specific options the channel itself does not interpret.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Lifecycle state
// ---------------------------------------------------------------------------

/// Subscription lifecycle of a channel.
///
/// Transitions are driven by the transport delivering the reserved
/// `subscription_succeeded`/`error` events and by [`Channel::unsubscribe`];
/// there are no internal timers. Operations are not rejected based on
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Not subscribed; also the terminal state after `unsubscribe`.
    Unsubscribed,
    /// Subscription requested from the transport, no reply yet.
    Subscribing,
    /// The transport acknowledged the subscription.
    Subscribed,
    /// The transport reported a subscription error.
    Errored,
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

struct Inner {
    name: String,
    options: ChannelOptions,
    transport: Arc<dyn Transport>,
    formatter: EventFormatter,
    /// Formatted event name -> exactly one callback. Registering again
    /// under the same name replaces the previous callback.
    listeners: Mutex<HashMap<String, Callback>>,
    state: Mutex<ChannelState>,
}

/// A named publish/subscribe topic.
#[derive(Clone)]
pub struct Channel {
    inner: Arc<Inner>,
}

impl Channel {
    /// Create a channel for `name` and immediately request subscription
    /// from the transport.
    ///
    /// Construction never blocks: subscription success or failure arrives
    /// later through the reserved `subscription_succeeded`/`error` events.
    pub fn new(
        transport: Arc<dyn Transport>,
        name: impl Into<String>,
        options: ChannelOptions,
    ) -> Self {
        let formatter = EventFormatter::new(options.namespace.as_deref());
        let channel = Self {
            inner: Arc::new(Inner {
                name: name.into(),
                options,
                transport,
                formatter,
                listeners: Mutex::new(HashMap::new()),
                state: Mutex::new(ChannelState::Unsubscribed),
            }),
        };

        channel.subscribe();
        channel
    }

    /// The topic name, fixed at construction.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The options the channel was constructed with.
    pub fn options(&self) -> &ChannelOptions {
        &self.inner.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChannelState {
        *self.inner.state.lock().unwrap()
    }

    /// Request that the transport begin routing this channel's events here.
    ///
    /// Idempotent: the transport deduplicates by channel name.
    pub fn subscribe(&self) {
        self.set_state(ChannelState::Subscribing);
        debug!(channel = %self.inner.name, "Requesting subscription");
        self.inner.transport.subscribe(self.clone());
    }

    /// Request that the transport stop routing events for this channel.
    ///
    /// Events already queued by the transport may still be delivered. The
    /// listener registry is left intact.
    pub fn unsubscribe(&self) {
        debug!(channel = %self.inner.name, "Unsubscribing");
        self.inner.transport.unsubscribe(self);
        self.set_state(ChannelState::Unsubscribed);
    }

    /// Listen for an application event on this channel.
    ///
    /// The event name is passed through the namespace formatter before
    /// registration; a prior callback under the same formatted name is
    /// replaced.
    pub fn listen(&self, event: &str, callback: Callback) -> &Self {
        let formatted = self.inner.formatter.format(event);
        self.on(formatted, callback)
    }

    /// Stop listening for an event.
    ///
    /// `event` is matched against the registry key verbatim: the formatted
    /// name for application events, the literal name for reserved events.
    /// When `callback` is given, the registration is only removed if it is
    /// the same `Arc` that is currently registered; this guards against
    /// removing a listener someone else replaced in the meantime.
    pub fn stop_listening(&self, event: &str, callback: Option<&Callback>) -> &Self {
        let mut listeners = self.inner.listeners.lock().unwrap();
        if let Some(current) = listeners.get(event) {
            let matches = match callback {
                Some(cb) => Arc::ptr_eq(current, cb),
                None => true,
            };
            if matches {
                listeners.remove(event);
            }
        }

        self
    }

    /// Register a callback invoked once the subscription succeeds.
    ///
    /// Keys on the literal reserved name; the acknowledgment payload is not
    /// forwarded.
    pub fn subscribed(&self, callback: impl Fn() + Send + Sync + 'static) -> &Self {
        self.on(
            events::SUBSCRIPTION_SUCCEEDED,
            Arc::new(move |_event, _data| callback()),
        )
    }

    /// Register a callback invoked when the transport reports a
    /// subscription error, with the status payload.
    pub fn error(&self, callback: impl Fn(&Value) + Send + Sync + 'static) -> &Self {
        self.on(events::ERROR, Arc::new(move |_event, data| callback(data)))
    }

    /// Bind a callback under exactly the given event name, no formatting.
    ///
    /// This is the low-level primitive behind `listen`/`subscribed`/`error`.
    /// Last registration wins.
    pub fn on(&self, event: impl Into<String>, callback: Callback) -> &Self {
        self.inner
            .listeners
            .lock()
            .unwrap()
            .insert(event.into(), callback);

        self
    }

    /// Dispatch an inbound transport event to the matching listener.
    ///
    /// Called by the transport with the wire-level event name. Events with
    /// no registered listener are dropped; channels routinely receive
    /// events no local code cares about.
    pub fn handle_event(&self, event: &str, data: &Value) {
        match event {
            events::SUBSCRIPTION_SUCCEEDED => {
                info!(channel = %self.inner.name, "Subscription succeeded");
                self.set_state(ChannelState::Subscribed);
            }
            events::ERROR => {
                warn!(channel = %self.inner.name, status = %data, "Subscription error");
                self.set_state(ChannelState::Errored);
            }
            _ => {}
        }

        // Take the callback out of the lock before invoking it so a
        // listener can re-register on the same channel.
        let callback = self.inner.listeners.lock().unwrap().get(event).cloned();
        match callback {
            Some(callback) => callback(event, data),
            None => {
                debug!(channel = %self.inner.name, event = %event, "Dropped event with no listener");
            }
        }
    }

    /// Send a client-originated ("whisper") event through the transport.
    ///
    /// The event name is sent raw, without namespace formatting.
    /// Fire-and-forget: a transport failure is logged, not surfaced.
    pub fn whisper(&self, event: &str, data: Value) -> &Self {
        let message = ClientMessage {
            event: event.to_string(),
            data,
        };
        if let Err(e) = self.inner.transport.send(message) {
            warn!(channel = %self.inner.name, event = %event, error = %e, "Whisper not sent");
        }

        self
    }

    /// Presence extension point: receive the current member list.
    ///
    /// Not implemented for this transport; registers nothing and returns
    /// the channel unchanged.
    pub fn here(&self, _callback: Callback) -> &Self {
        debug!(channel = %self.inner.name, "Presence member list not implemented");
        self
    }

    /// Presence extension point: listen for members joining.
    ///
    /// Not implemented for this transport; registers nothing and returns
    /// the channel unchanged.
    pub fn joining(&self, _callback: Callback) -> &Self {
        debug!(channel = %self.inner.name, "Presence joins not implemented");
        self
    }

    /// Presence extension point: listen for members leaving.
    ///
    /// Not implemented for this transport; registers nothing and returns
    /// the channel unchanged.
    pub fn leaving(&self, _callback: Callback) -> &Self {
        debug!(channel = %self.inner.name, "Presence leaves not implemented");
        self
    }

    fn set_state(&self, next: ChannelState) {
        let mut state = self.inner.state.lock().unwrap();
        if *state != next {
            debug!(channel = %self.inner.name, from = ?*state, to = ?next, "Channel state change");
            *state = next;
        }
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .field(
                "listeners",
                &self.inner.listeners.lock().unwrap().len(),
            )
            .finish()
    }
}
