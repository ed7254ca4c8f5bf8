use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("Missing AWS credentials: environment variable {variable} is not set.")]
    MissingCredentials { variable: &'static str },
    #[error("Failed to build sigv4 params: {source}")]
    SigV4Params {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sigv4 request: {source}")]
    SigV4Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to sign request: {source}")]
    SigV4Sign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sign request: {source}")]
    SigV4BuildSign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
