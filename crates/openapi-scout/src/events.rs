//! Structured diagnostics emitted by the engine.
//!
//! Components never log through a global. They emit [`ScoutEvent`]s into the
//! [`EventSink`] their caller handed them; [`TracingSink`] forwards those to
//! `tracing`, [`RecordingSink`] keeps them for inspection.

use std::sync::Mutex;

/// A diagnostic produced while resolving, fetching or probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoutEvent {
    FetchStarted { url: String },
    AuthApplied { scheme: String },
    UnknownAuthScheme { scheme: String },
    PortalRewritten { from: String, to: String },
    FallbackAttempt { url: String },
    FallbackFailed { url: String, cause: String },
    FallbackAnswered { url: String },
    FetchFailed { url: String, cause: String },
    ProbeStarted { base_url: String, paths: usize },
    ProbeChecked { url: String, found: bool },
}

/// Receiver for engine diagnostics.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScoutEvent);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ScoutEvent) {
        match event {
            ScoutEvent::FetchStarted { url } => tracing::info!(%url, "Fetching specification"),
            ScoutEvent::AuthApplied { scheme } => tracing::info!(%scheme, "Using authentication"),
            ScoutEvent::UnknownAuthScheme { scheme } => {
                tracing::warn!(%scheme, "Unknown authentication type, sending no auth headers")
            }
            ScoutEvent::PortalRewritten { from, to } => {
                tracing::info!(%from, %to, "Converted portal URL to API endpoint")
            }
            ScoutEvent::FallbackAttempt { url } => tracing::info!(%url, "Trying alternative URL"),
            ScoutEvent::FallbackFailed { url, cause } => {
                tracing::warn!(%url, %cause, "Alternative URL failed")
            }
            ScoutEvent::FallbackAnswered { url } => {
                tracing::info!(%url, "Alternative URL answered")
            }
            ScoutEvent::FetchFailed { url, cause } => {
                tracing::error!(%url, %cause, "Error fetching specification")
            }
            ScoutEvent::ProbeStarted { base_url, paths } => {
                tracing::info!(%base_url, paths, "Searching for specifications")
            }
            ScoutEvent::ProbeChecked { url, found } => tracing::debug!(%url, found, "Probed path"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ScoutEvent) {}
}

/// Keeps events in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ScoutEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ScoutEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ScoutEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(ScoutEvent::FetchStarted {
            url: "https://a.test".to_string(),
        });
        sink.emit(ScoutEvent::AuthApplied {
            scheme: "bearer".to_string(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ScoutEvent::FetchStarted { .. }));
        assert!(matches!(events[1], ScoutEvent::AuthApplied { .. }));
    }
}
