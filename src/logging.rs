use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{field::Field, field::Visit, Event, Subscriber};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

/// Ring buffer capacity for captured events
const MAX_ENTRIES: usize = 1000;

/// A captured relay event.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// Shared handle to the captured entries
pub type LogBuffer = Arc<RwLock<VecDeque<LogEntry>>>;

/// A visitor to extract the message from an event's fields.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// A tracing layer that keeps events in a bounded in-memory ring buffer.
///
/// The relay emits events through `tracing` and never talks to a sink
/// directly; this layer is the in-process sink used by the test suite and
/// by embedders that want to read events back.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogLayer {
    buffer: LogBuffer,
}

impl MemoryLogLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the buffer behind this layer
    pub fn buffer(&self) -> LogBuffer {
        self.buffer.clone()
    }

    /// Messages captured so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.buffer
            .read()
            .map(|entries| entries.iter().map(|entry| entry.message.clone()).collect())
            .unwrap_or_default()
    }
}

impl<S> Layer<S> for MemoryLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Some(message) = visitor.message {
            let entry = LogEntry {
                timestamp: Utc::now(),
                level: event.metadata().level().to_string(),
                target: event.metadata().target().to_string(),
                message,
            };

            if let Ok(mut buffer) = self.buffer.write() {
                buffer.push_back(entry);
                if buffer.len() > MAX_ENTRIES {
                    buffer.pop_front();
                }
            }
        }
    }
}
