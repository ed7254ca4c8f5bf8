use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::info;

pub const TRACE_TARGET: &str = "httpreq::trace";

/// Connection lifecycle events observed while a request executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    DnsStart { host: String },
    DnsDone { addrs: usize },
    ConnectStart,
    ConnectDone,
    TlsHandshakeStart,
    TlsHandshakeDone,
}

/// Receives lifecycle events synchronously from the transport.
///
/// Implementations must only record; they run inside the request's
/// execution and must not block or perform I/O.
pub trait TraceSink: Send + Sync {
    fn on_event(&self, event: TraceEvent);
}

/// Phase timings for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceReport {
    pub dns: Option<Duration>,
    pub connect: Option<Duration>,
    pub tls: Option<Duration>,
    pub total: Duration,
}

#[derive(Debug, Default)]
struct TraceState {
    dns_start: Option<Instant>,
    dns: Option<Duration>,
    connect_start: Option<Instant>,
    connect: Option<Duration>,
    tls_start: Option<Instant>,
    tls: Option<Duration>,
}

/// Collects the phases of one request; [`crate::http::Client::send`]
/// creates a fresh tracer for every call.
#[derive(Debug, Default)]
pub struct Tracer {
    state: Mutex<TraceState>,
}

impl Tracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &TraceEvent, at: Instant) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            TraceEvent::DnsStart { .. } => state.dns_start = Some(at),
            TraceEvent::DnsDone { .. } => state.dns = phase(state.dns_start, at),
            TraceEvent::ConnectStart => state.connect_start = Some(at),
            TraceEvent::ConnectDone => state.connect = phase(state.connect_start, at),
            TraceEvent::TlsHandshakeStart => state.tls_start = Some(at),
            TraceEvent::TlsHandshakeDone => state.tls = phase(state.tls_start, at),
        }
    }

    /// Logs and returns the recorded phases together with the total time.
    pub fn report(&self, total: Duration) -> TraceReport {
        let report = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            TraceReport {
                dns: state.dns,
                connect: state.connect,
                tls: state.tls,
                total,
            }
        };
        info!(
            target: TRACE_TARGET,
            "dns: {}  connect: {}  tls: {}  total: {}",
            format_phase(report.dns),
            format_phase(report.connect),
            format_phase(report.tls),
            format_phase(Some(report.total)),
        );
        report
    }
}

impl TraceSink for Tracer {
    fn on_event(&self, event: TraceEvent) {
        self.record(&event, Instant::now());
    }
}

fn phase(start: Option<Instant>, done: Instant) -> Option<Duration> {
    start.map(|start| done.saturating_duration_since(start))
}

fn format_phase(phase: Option<Duration>) -> String {
    phase.map_or_else(|| "-".to_owned(), |value| format!("{:?}", value))
}
