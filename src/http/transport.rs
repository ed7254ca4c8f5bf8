use std::io;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use reqwest::Request;
use reqwest::header::{HOST, HeaderValue, USER_AGENT};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_native_tls::{TlsConnector, TlsStream, native_tls};
use tracing::debug;
use url::{Host, Url};

use crate::error::{HttpError, TransportError};

use super::client::{CLIENT_TARGET, ClientSettings, DEFAULT_USER_AGENT};
use super::tracer::{TraceEvent, TraceSink};

/// Plain TCP or TLS connection to the origin.
enum Stream {
    Plain(TcpStream),
    Tls(Pin<Box<TlsStream<TcpStream>>>),
}

impl AsyncRead for Stream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            Self::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            Self::Tls(stream) => stream.as_mut().poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Stream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            Self::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            Self::Tls(stream) => stream.as_mut().poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            Self::Plain(stream) => Pin::new(stream).poll_flush(cx),
            Self::Tls(stream) => stream.as_mut().poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            Self::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            Self::Tls(stream) => stream.as_mut().poll_shutdown(cx),
        }
    }
}

/// Opens one HTTP/1.1 connection per request and reports its DNS, TCP and
/// TLS phases to a [`TraceSink`].
pub(crate) struct Transport {
    tls: TlsConnector,
    timeout: Option<Duration>,
}

impl Transport {
    pub(crate) fn new(settings: &ClientSettings) -> Result<Self, HttpError> {
        let mut builder = native_tls::TlsConnector::builder();
        if let Some(identity) = settings.identity() {
            builder.identity(identity.identity()?);
        }
        let connector = builder
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;
        Ok(Self {
            tls: TlsConnector::from(connector),
            timeout: settings.timeout,
        })
    }

    /// Sends `request` and returns once the response head has arrived.
    ///
    /// The configured timeout bounds everything up to that point.
    pub(crate) async fn execute(
        &self,
        request: &Request,
        sink: &dyn TraceSink,
    ) -> Result<hyper::Response<Incoming>, TransportError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.dispatch(request, sink))
                .await
                .unwrap_or(Err(TransportError::Timeout { timeout })),
            None => self.dispatch(request, sink).await,
        }
    }

    async fn dispatch(
        &self,
        request: &Request,
        sink: &dyn TraceSink,
    ) -> Result<hyper::Response<Incoming>, TransportError> {
        let url = request.url();
        let secure = match url.scheme() {
            "https" => true,
            "http" => false,
            other => {
                return Err(TransportError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        };
        let (host, port) = match (url.host(), url.port_or_known_default()) {
            (Some(host), Some(port)) => (host, port),
            (None, _) | (Some(_), None) => {
                return Err(TransportError::MissingHost {
                    url: url.to_string(),
                });
            }
        };

        let domain = host_name(&host);
        let addrs = resolve(&host, port, sink).await?;
        let tcp = connect(&domain, &addrs, sink).await?;
        let stream = if secure {
            Stream::Tls(Box::pin(self.handshake(&domain, tcp, sink).await?))
        } else {
            Stream::Plain(tcp)
        };

        let (mut sender, connection) = http1::handshake::<_, Full<Bytes>>(TokioIo::new(stream))
            .await
            .map_err(|err| TransportError::Handshake { source: err })?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                debug!(target: CLIENT_TARGET, "Connection closed with error: {}", err);
            }
        });

        let outgoing = outgoing_request(request)?;
        sender
            .send_request(outgoing)
            .await
            .map_err(|err| TransportError::Send { source: err })
    }

    async fn handshake(
        &self,
        domain: &str,
        tcp: TcpStream,
        sink: &dyn TraceSink,
    ) -> Result<TlsStream<TcpStream>, TransportError> {
        sink.on_event(TraceEvent::TlsHandshakeStart);
        let stream = self.tls.connect(domain, tcp).await;
        sink.on_event(TraceEvent::TlsHandshakeDone);
        stream.map_err(|err| TransportError::TlsHandshake {
            host: domain.to_owned(),
            source: err,
        })
    }
}

/// IP literals skip the lookup and report no DNS phase.
async fn resolve(
    host: &Host<&str>,
    port: u16,
    sink: &dyn TraceSink,
) -> Result<Vec<SocketAddr>, TransportError> {
    let domain = match host {
        Host::Ipv4(ip) => return Ok(vec![SocketAddr::new(IpAddr::V4(*ip), port)]),
        Host::Ipv6(ip) => return Ok(vec![SocketAddr::new(IpAddr::V6(*ip), port)]),
        Host::Domain(domain) => *domain,
    };

    sink.on_event(TraceEvent::DnsStart {
        host: domain.to_owned(),
    });
    let resolved = tokio::net::lookup_host((domain, port))
        .await
        .map(|addrs| addrs.collect::<Vec<SocketAddr>>());
    sink.on_event(TraceEvent::DnsDone {
        addrs: resolved.as_ref().map_or(0, Vec::len),
    });

    let addrs = resolved.map_err(|err| TransportError::Resolve {
        host: domain.to_owned(),
        source: err,
    })?;
    if addrs.is_empty() {
        return Err(TransportError::NoAddresses {
            host: domain.to_owned(),
        });
    }
    Ok(addrs)
}

/// Tries each address in order; every attempt is reported.
async fn connect(
    host: &str,
    addrs: &[SocketAddr],
    sink: &dyn TraceSink,
) -> Result<TcpStream, TransportError> {
    let mut last_error = None;
    for addr in addrs {
        sink.on_event(TraceEvent::ConnectStart);
        let attempt = TcpStream::connect(*addr).await;
        sink.on_event(TraceEvent::ConnectDone);
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                debug!(target: CLIENT_TARGET, "Connect to {} failed: {}", addr, err);
                last_error = Some(TransportError::Connect {
                    addr: *addr,
                    source: err,
                });
            }
        }
    }
    Err(last_error.unwrap_or_else(|| TransportError::NoAddresses {
        host: host.to_owned(),
    }))
}

fn host_name(host: &Host<&str>) -> String {
    match host {
        Host::Domain(domain) => (*domain).to_owned(),
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => ip.to_string(),
    }
}

/// Converts the built request into an origin-form HTTP/1.1 request.
fn outgoing_request(request: &Request) -> Result<http::Request<Full<Bytes>>, TransportError> {
    let url = request.url();
    let mut target = url.path().to_owned();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let body = request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .map(Bytes::copy_from_slice)
        .unwrap_or_default();
    let mut outgoing = http::Request::builder()
        .method(request.method().clone())
        .uri(target)
        .body(Full::new(body))
        .map_err(|err| TransportError::InvalidRequest { source: err })?;

    let headers = outgoing.headers_mut();
    *headers = request.headers().clone();
    if !headers.contains_key(HOST) {
        let value = HeaderValue::from_str(&host_header(url)).map_err(|err| {
            TransportError::InvalidRequest {
                source: http::Error::from(err),
            }
        })?;
        headers.insert(HOST, value);
    }
    if !headers.contains_key(USER_AGENT) {
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    }
    Ok(outgoing)
}

/// `host[:port]`, with the port omitted when it is the scheme default.
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_owned(),
    }
}
