use thiserror::Error;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL must not be empty.")]
    Empty,
    #[error("Invalid URL '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("URL '{url}' is missing host.")]
    MissingHost { url: String },
}
