use std::time::Duration;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, StatusCode, Url};
use tokio::time::Instant;

use crate::error::{HttpError, TransportError};

use super::tracer::TraceReport;

/// What was sent, kept for reporting after the request has been consumed.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl From<&Request> for SentRequest {
    fn from(request: &Request) -> Self {
        Self {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
        }
    }
}

#[derive(Debug)]
enum Body {
    Pending {
        incoming: Incoming,
        deadline: Option<Instant>,
    },
    Read(Bytes),
    Unavailable,
}

#[derive(Debug)]
enum Outcome {
    Completed {
        status: StatusCode,
        headers: HeaderMap,
        body: Body,
    },
    Failed(TransportError),
}

/// Outcome of one dispatched request.
///
/// Holds either a completed response or the transport error, never both.
/// HTTP error statuses count as completed responses.
#[derive(Debug)]
pub struct RequestResult {
    request: SentRequest,
    elapsed: Duration,
    outcome: Outcome,
    trace: Option<TraceReport>,
}

impl RequestResult {
    pub(crate) fn completed(
        request: SentRequest,
        response: hyper::Response<Incoming>,
        elapsed: Duration,
        trace: TraceReport,
        deadline: Option<Instant>,
    ) -> Self {
        let (parts, incoming) = response.into_parts();
        Self {
            request,
            elapsed,
            outcome: Outcome::Completed {
                status: parts.status,
                headers: parts.headers,
                body: Body::Pending { incoming, deadline },
            },
            trace: Some(trace),
        }
    }

    pub(crate) const fn failed(
        request: SentRequest,
        error: TransportError,
        elapsed: Duration,
    ) -> Self {
        Self {
            request,
            elapsed,
            outcome: Outcome::Failed(error),
            trace: None,
        }
    }

    /// True when no transport error occurred, regardless of status code.
    #[must_use]
    pub const fn successful(&self) -> bool {
        matches!(self.outcome, Outcome::Completed { .. })
    }

    #[must_use]
    pub const fn has_error(&self) -> bool {
        !self.successful()
    }

    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match &self.outcome {
            Outcome::Completed { status, .. } => Some(*status),
            Outcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn headers(&self) -> Option<&HeaderMap> {
        match &self.outcome {
            Outcome::Completed { headers, .. } => Some(headers),
            Outcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&TransportError> {
        match &self.outcome {
            Outcome::Completed { .. } => None,
            Outcome::Failed(err) => Some(err),
        }
    }

    /// Connection phase timings, present for completed requests.
    #[must_use]
    pub const fn trace(&self) -> Option<&TraceReport> {
        self.trace.as_ref()
    }

    #[must_use]
    pub const fn request(&self) -> &SentRequest {
        &self.request
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Elapsed time is reported with sub-millisecond precision"
    )]
    pub fn elapsed_milliseconds(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    /// Reads and buffers the response body.
    ///
    /// The first call reads from the connection; later calls return the
    /// buffered bytes. The client timeout, when set, also bounds this read.
    ///
    /// # Errors
    ///
    /// Returns an error when the request failed, or when reading the body
    /// failed or timed out (on this or an earlier call).
    pub async fn body(&mut self) -> Result<Bytes, HttpError> {
        let Outcome::Completed { body, .. } = &mut self.outcome else {
            return Err(HttpError::NoResponse);
        };
        match std::mem::replace(body, Body::Unavailable) {
            Body::Pending { incoming, deadline } => {
                let collected = match deadline {
                    Some(deadline) => {
                        match tokio::time::timeout_at(deadline, incoming.collect()).await {
                            Ok(collected) => collected,
                            Err(_elapsed) => return Err(HttpError::BodyTimeout),
                        }
                    }
                    None => incoming.collect().await,
                };
                let bytes = collected
                    .map_err(|err| HttpError::ReadBody { source: err })?
                    .to_bytes();
                *body = Body::Read(bytes.clone());
                Ok(bytes)
            }
            Body::Read(bytes) => {
                *body = Body::Read(bytes.clone());
                Ok(bytes)
            }
            Body::Unavailable => Err(HttpError::BodyUnavailable),
        }
    }

    /// Body bytes if [`RequestResult::body`] has already read them.
    #[must_use]
    pub const fn buffered_body(&self) -> Option<&Bytes> {
        match &self.outcome {
            Outcome::Completed {
                body: Body::Read(bytes),
                ..
            } => Some(bytes),
            Outcome::Completed { .. } | Outcome::Failed(_) => None,
        }
    }
}
