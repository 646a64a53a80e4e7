//! Event-name formatting and namespacing.
//!
//! Application events ride on the wire under a fully-qualified name built
//! from an optional namespace (e.g. `App.Events` + `OrderShipped` becomes
//! `App.Events.OrderShipped`). System events bypass this entirely; see
//! `protocol::events`.

/// Formats bare event names into their namespaced wire form.
///
/// Constructed once per channel from the channel options and stateless
/// afterward.
#[derive(Debug, Clone)]
pub struct EventFormatter {
    namespace: Option<String>,
}

impl EventFormatter {
    /// Create a formatter scoped to `namespace`. An empty or absent
    /// namespace means no prefixing.
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace
                .map(str::to_string)
                .filter(|ns| !ns.is_empty()),
        }
    }

    /// Format an event name for registration and dispatch.
    ///
    /// A leading `.` or `\` escapes namespacing: the marker is stripped and
    /// the remainder used verbatim. Otherwise the namespace, when present,
    /// is prepended with a `.` separator.
    pub fn format(&self, event: &str) -> String {
        if let Some(rest) = event.strip_prefix('.').or_else(|| event.strip_prefix('\\')) {
            return rest.to_string();
        }

        match &self.namespace {
            Some(ns) => format!("{ns}.{event}"),
            None => event.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_with_namespace() {
        let fmt = EventFormatter::new(Some("App.Events"));
        assert_eq!(fmt.format("OrderShipped"), "App.Events.OrderShipped");
    }

    #[test]
    fn no_namespace_is_identity() {
        let fmt = EventFormatter::new(None);
        assert_eq!(fmt.format("OrderShipped"), "OrderShipped");
    }

    #[test]
    fn empty_namespace_is_identity() {
        let fmt = EventFormatter::new(Some(""));
        assert_eq!(fmt.format("OrderShipped"), "OrderShipped");
    }

    #[test]
    fn leading_dot_escapes_namespace() {
        let fmt = EventFormatter::new(Some("App.Events"));
        assert_eq!(fmt.format(".custom-event"), "custom-event");
    }

    #[test]
    fn leading_backslash_escapes_namespace() {
        let fmt = EventFormatter::new(Some("App.Events"));
        assert_eq!(
            fmt.format("\\Other.Namespace.Event"),
            "Other.Namespace.Event"
        );
    }
}
