//! Application telemetry events and sinks.
//!
//! OpenFindr's fetch orchestration discards stale responses silently as far
//! as users are concerned, but those discards are still useful operational
//! signals when debugging dispatch behavior, so they are surfaced through a
//! lightweight telemetry sink.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the fetch orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A debounce window settled and a search request was dispatched.
    SearchDispatched {
        /// Sequence number carried by the dispatched request.
        sequence: u64,
    },
    /// A completed response was discarded because a newer request had been
    /// dispatched in the meantime.
    StaleResponseDiscarded {
        /// Sequence number of the discarded response.
        sequence: u64,
        /// Highest sequence number dispatched so far.
        latest: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialized) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialized);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
