use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::http::{RequestResult, TraceReport};

use super::runner::TargetOutcome;

#[derive(Debug, Serialize)]
struct OutcomeRecord<'out> {
    id: &'out str,
    method: &'out str,
    url: &'out str,
    status: Option<u16>,
    elapsed_ms: Option<f64>,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
    trace: Option<TraceRecord>,
    error: Option<String>,
}

/// Connection phases in milliseconds; absent phases serialize as `null`.
#[derive(Debug, Serialize)]
struct TraceRecord {
    dns_ms: Option<f64>,
    connect_ms: Option<f64>,
    tls_ms: Option<f64>,
}

impl From<&TraceReport> for TraceRecord {
    fn from(report: &TraceReport) -> Self {
        Self {
            dns_ms: report.dns.map(milliseconds),
            connect_ms: report.connect.map(milliseconds),
            tls_ms: report.tls.map(milliseconds),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Phase timings are reported with sub-millisecond precision"
)]
fn milliseconds(phase: Duration) -> f64 {
    phase.as_secs_f64() * 1_000.0
}

impl<'out> OutcomeRecord<'out> {
    fn from_outcome(outcome: &'out TargetOutcome) -> Self {
        let mut record = Self {
            id: &outcome.id,
            method: &outcome.method,
            url: &outcome.url,
            status: None,
            elapsed_ms: None,
            headers: BTreeMap::new(),
            body: None,
            trace: None,
            error: None,
        };
        match &outcome.result {
            Ok(result) => {
                record.status = result.status().map(|status| status.as_u16());
                record.elapsed_ms = Some(result.elapsed_milliseconds());
                record.headers = header_pairs(result);
                record.body = result.buffered_body().and_then(body_value);
                record.trace = result.trace().map(TraceRecord::from);
                record.error = result.error().map(ToString::to_string);
            }
            Err(err) => record.error = Some(err.to_string()),
        }
        record
    }
}

fn header_pairs(result: &RequestResult) -> BTreeMap<String, String> {
    result
        .headers()
        .map(|headers| {
            headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn body_value(body: &Bytes) -> Option<serde_json::Value> {
    if body.is_empty() {
        return None;
    }
    Some(serde_json::from_slice(body).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
    }))
}

fn body_text(body: &Bytes) -> Option<String> {
    match body_value(body)? {
        serde_json::Value::String(text) => Some(text),
        value => Some(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())),
    }
}

/// Renders outcomes as human readable text, one block per request.
pub(crate) fn render_text(outcomes: &[TargetOutcome], show_headers: bool) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let _write_result = write!(out, "[{}] {} {}", outcome.id, outcome.method, outcome.url);
        match &outcome.result {
            Ok(result) => match (result.status(), result.error()) {
                (Some(status), _) => {
                    let _write_result = writeln!(
                        out,
                        " -> {} ({:.2} ms)",
                        status,
                        result.elapsed_milliseconds()
                    );
                    if show_headers {
                        for (name, value) in header_pairs(result) {
                            let _write_result = writeln!(out, "  {}: {}", name, value);
                        }
                    }
                    if let Some(text) = result.buffered_body().and_then(body_text) {
                        let _write_result = writeln!(out, "{}", text);
                    }
                }
                (None, error) => {
                    let _write_result = writeln!(
                        out,
                        " -> failed after {:.2} ms: {}",
                        result.elapsed_milliseconds(),
                        error.map_or_else(|| "unknown error".to_owned(), ToString::to_string)
                    );
                }
            },
            Err(err) => {
                let _write_result = writeln!(out, " -> not sent: {}", err);
            }
        }
    }
    out
}

/// Renders outcomes as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub(crate) fn render_json(outcomes: &[TargetOutcome]) -> AppResult<String> {
    let records: Vec<OutcomeRecord<'_>> =
        outcomes.iter().map(OutcomeRecord::from_outcome).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub(crate) fn print_outcomes(
    outcomes: &[TargetOutcome],
    format: OutputFormat,
    show_headers: bool,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(outcomes, show_headers)),
        OutputFormat::Json => println!("{}", render_json(outcomes)?),
    }
    Ok(())
}
