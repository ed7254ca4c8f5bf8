use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("URL '{url}' is missing host.")]
    MissingHost { url: String },
    #[error("Unsupported URL scheme '{scheme}'.")]
    UnsupportedScheme { scheme: String },
    #[error("Failed to resolve '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No addresses found for '{host}'.")]
    NoAddresses { host: String },
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("TLS handshake with '{host}' failed: {source}")]
    TlsHandshake {
        host: String,
        #[source]
        source: tokio_native_tls::native_tls::Error,
    },
    #[error("HTTP/1.1 handshake failed: {source}")]
    Handshake {
        #[source]
        source: hyper::Error,
    },
    #[error("Failed to prepare request: {source}")]
    InvalidRequest {
        #[source]
        source: http::Error,
    },
    #[error("Request failed: {source}")]
    Send {
        #[source]
        source: hyper::Error,
    },
    #[error("Request timed out after {timeout:?}.")]
    Timeout { timeout: Duration },
}
