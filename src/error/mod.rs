mod app;
mod build;
mod config;
mod http;
mod sign;
mod transport;
mod url;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use build::BuildError;
pub use config::ConfigError;
pub use self::http::HttpError;
pub use sign::SignError;
pub use transport::TransportError;
pub use self::url::UrlError;
pub use validation::ValidationError;
