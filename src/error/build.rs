use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid or unsupported method: {method}")]
    UnsupportedMethod { method: String },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: http::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: http::header::InvalidHeaderValue,
    },
    #[error("Failed to encode request body: {source}")]
    EncodeBody {
        #[source]
        source: serde_json::Error,
    },
}
