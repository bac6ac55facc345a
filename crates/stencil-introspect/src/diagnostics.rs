//! Diagnostic sinks
//!
//! The class tool reports non-fatal problems (currently only unresolvable
//! class names) to an optional sink. Whether a sink is wired never changes
//! what the tool returns.

use parking_lot::Mutex;

/// Receiver for error-level diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::error!(target: "stencil::introspect", "{}", message);
    }
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn error(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.error("first");
        sink.error("second");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["first".to_string(), "second".to_string()]);
    }
}
