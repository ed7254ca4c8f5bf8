use url::Url;

use crate::error::UrlError;

/// Parses a user-supplied URL.
///
/// Accepts `:port/path` as shorthand for `http://localhost:port/path` and
/// defaults to `http://` when no scheme is given.
///
/// # Errors
///
/// Returns an error when the input is empty, cannot be parsed, is not
/// http/https, or has no host.
pub fn parse_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if trimmed.starts_with(':') {
        format!("http://localhost{}", trimmed)
    } else if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|err| UrlError::Parse {
        url: raw.to_owned(),
        source: err,
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(UrlError::UnsupportedScheme {
                url: raw.to_owned(),
                scheme: other.to_owned(),
            });
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingHost {
            url: raw.to_owned(),
        });
    }

    Ok(url)
}
