use thiserror::Error;

use super::UrlError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid or missing ID '{id}'. IDs must be non-empty and cannot contain whitespace.")]
    MissingOrInvalidId { id: String },
    #[error("Duplicate ID: {id}")]
    DuplicateId { id: String },
    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),
    #[error("Missing body in POST request with ID '{id}'")]
    MissingBody { id: String },
    #[error("Missing required field 'requests'.")]
    MissingRequests,
    #[error("Requests cannot be empty.")]
    EmptyRequests,
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid JSON body: {source}")]
    InvalidJsonBody {
        #[source]
        source: serde_json::Error,
    },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("--cert requires --key.")]
    CertRequiresKey,
    #[error("--key requires --cert.")]
    KeyRequiresCert,
    #[error("{failed} request(s) failed.")]
    RequestsFailed { failed: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
