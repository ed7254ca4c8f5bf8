use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to read cert '{path}': {source}")]
    ReadCert {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read key '{path}': {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid cert/key: {source}")]
    InvalidIdentity {
        #[source]
        source: tokio_native_tls::native_tls::Error,
    },
    #[error("Failed to build TLS connector: {source}")]
    BuildClientFailed {
        #[source]
        source: tokio_native_tls::native_tls::Error,
    },
    #[error("Request failed before a response was received.")]
    NoResponse,
    #[error("Failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: hyper::Error,
    },
    #[error("Reading the response body timed out.")]
    BodyTimeout,
    #[error("Response body could not be read.")]
    BodyUnavailable,
}
