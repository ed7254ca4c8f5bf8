use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Request, Url};
use tracing::debug;

use crate::args::HttpMethod;
use crate::error::{BuildError, HttpError, SignError};
use crate::spec::AwsSignConfig;

use super::result::{RequestResult, SentRequest};
use super::sign::{credentials_from_env, sign_request};
use super::tls::ClientIdentityPem;
use super::tracer::Tracer;
use super::transport::Transport;

pub const CLIENT_TARGET: &str = "httpreq::client";

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("httpreq/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every request of a [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub timeout: Option<Duration>,
    identity: Option<ClientIdentityPem>,
}

impl ClientSettings {
    pub(crate) const fn identity(&self) -> Option<&ClientIdentityPem> {
        self.identity.as_ref()
    }
}

/// Builds, signs and dispatches requests.
///
/// Every send opens its own connection and traces it with its own
/// [`Tracer`], so concurrent sends never share phase timings.
pub struct Client {
    transport: Transport,
    settings: ClientSettings,
}

impl Client {
    /// Creates a client from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS connector cannot be built.
    pub fn new(settings: ClientSettings) -> Result<Self, HttpError> {
        let transport = Transport::new(&settings)?;
        Ok(Self {
            transport,
            settings,
        })
    }

    /// Sets the client-wide timeout covering each whole request.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot be rebuilt.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), HttpError> {
        let mut settings = self.settings.clone();
        settings.timeout = Some(timeout);
        self.replace_transport(settings)
    }

    /// Loads a PEM client certificate and key and uses them for TLS.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be read or the pair is not a
    /// valid identity. The previous configuration is kept in that case.
    pub fn set_cert(&mut self, public_path: &Path, private_path: &Path) -> Result<(), HttpError> {
        let identity = ClientIdentityPem::load(public_path, private_path)?;
        let mut settings = self.settings.clone();
        settings.identity = Some(identity);
        self.replace_transport(settings)
    }

    fn replace_transport(&mut self, settings: ClientSettings) -> Result<(), HttpError> {
        self.transport = Transport::new(&settings)?;
        self.settings = settings;
        Ok(())
    }

    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Builds a request without sending it.
    ///
    /// `headers`, when given, replace the request's header set entirely.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsupportedMethod`] for methods other than
    /// GET, HEAD, POST, PATCH, PUT and DELETE.
    pub fn build(
        &self,
        method: &str,
        url: &Url,
        body: Option<&[u8]>,
        headers: Option<HeaderMap>,
    ) -> Result<Request, BuildError> {
        let method: HttpMethod = method.parse()?;
        debug!(target: CLIENT_TARGET, "Building request: {} {}", method, url);

        let mut request = Request::new(method.to_reqwest(), url.clone());
        if let Some(body) = body {
            debug!(
                target: CLIENT_TARGET,
                "Using request body: {}",
                String::from_utf8_lossy(body)
            );
            *request.body_mut() = Some(reqwest::Body::from(body.to_vec()));
        }
        if let Some(headers) = headers {
            *request.headers_mut() = headers;
        }
        Ok(request)
    }

    /// Signs `request` with SigV4 using credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when credentials are missing or signing fails; the
    /// request is left untouched in that case.
    pub fn sign(
        &self,
        request: &mut Request,
        body: &[u8],
        config: &AwsSignConfig,
    ) -> Result<(), SignError> {
        debug!(
            target: CLIENT_TARGET,
            "Signing request using Sig V4 (region: {}, service: {})",
            config.region,
            config.service
        );
        let credentials = credentials_from_env()?;
        sign_request(
            request,
            body,
            &credentials,
            &config.region,
            &config.service,
            SystemTime::now(),
        )
    }

    /// Dispatches `request` once and wraps the outcome.
    ///
    /// Transport failures are captured in the returned result; HTTP error
    /// statuses are not treated as failures.
    pub async fn send(&self, request: Request) -> RequestResult {
        let sent = SentRequest::from(&request);
        debug!(target: CLIENT_TARGET, "Sending request: {} {}", sent.method, sent.url);
        if !sent.headers.is_empty() {
            debug!(
                target: CLIENT_TARGET,
                "{}",
                format_headers("Request headers:", &sent.headers)
            );
        }

        let tracer = Tracer::new();
        let start = Instant::now();
        let outcome = self.transport.execute(&request, &tracer).await;
        let elapsed = start.elapsed();

        match outcome {
            Ok(response) => {
                debug!(target: CLIENT_TARGET, "Response status: {}", response.status());
                let trace = tracer.report(elapsed);
                debug!(
                    target: CLIENT_TARGET,
                    "{}",
                    format_headers("Response headers:", response.headers())
                );
                let body_deadline = self
                    .settings
                    .timeout
                    .and_then(|timeout| tokio::time::Instant::from_std(start).checked_add(timeout));
                RequestResult::completed(sent, response, elapsed, trace, body_deadline)
            }
            Err(err) => {
                debug!(target: CLIENT_TARGET, "Request failed: {}", err);
                RequestResult::failed(sent, err, elapsed)
            }
        }
    }
}

/// Converts spec headers into a header map.
///
/// # Errors
///
/// Returns an error for header names or values that are not valid HTTP.
pub fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, BuildError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|err| BuildError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })?;
        let val = HeaderValue::from_str(value).map_err(|err| BuildError::InvalidHeaderValue {
            header: key.clone(),
            source: err,
        })?;
        map.insert(name, val);
    }
    Ok(map)
}

fn format_headers(title: &str, headers: &HeaderMap) -> String {
    let mut out = String::from(title);
    for (name, value) in headers {
        let _write_result = write!(
            out,
            "\n  {}: {}",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
    out
}
