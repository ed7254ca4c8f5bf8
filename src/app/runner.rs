use std::collections::BTreeMap;

use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, warn};

use crate::{
    args::HttpMethod,
    error::{AppError, AppResult, BuildError},
    http::{Client, RequestResult, header_map, parse_url},
    spec::{AwsSignConfig, RequestTarget, Spec},
};

/// Everything needed to execute one request.
#[derive(Debug, Clone)]
pub(crate) struct RequestPlan {
    pub method: String,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    pub signing: Option<AwsSignConfig>,
}

impl RequestPlan {
    pub(crate) fn from_target(target: &RequestTarget) -> AppResult<Self> {
        let url = parse_url(target.url()).map_err(AppError::validation)?;
        Ok(Self {
            method: target.method().to_owned(),
            url,
            headers: target.headers().clone(),
            body: target.body().cloned(),
            signing: target.signing().cloned(),
        })
    }

    pub(crate) fn single(
        method: HttpMethod,
        url: Url,
        headers: BTreeMap<String, String>,
        body: Option<serde_json::Value>,
        signing: Option<AwsSignConfig>,
    ) -> Self {
        Self {
            method: method.as_str().to_owned(),
            url,
            headers,
            body,
            signing,
        }
    }
}

/// Result of executing one request target.
///
/// Build and sign failures end up in `result` as errors; transport failures
/// are carried by the [`RequestResult`] itself.
#[derive(Debug)]
pub(crate) struct TargetOutcome {
    pub id: String,
    pub method: String,
    pub url: String,
    pub result: AppResult<RequestResult>,
}

impl TargetOutcome {
    pub(crate) fn is_failure(&self, fail_on_status: bool) -> bool {
        match &self.result {
            Err(_) => true,
            Ok(result) if result.has_error() => true,
            Ok(result) => {
                fail_on_status
                    && result
                        .status()
                        .is_some_and(|status| status.is_client_error() || status.is_server_error())
            }
        }
    }
}

/// Executes every request of a validated spec, in order.
///
/// A failing request does not stop the remaining ones.
pub(crate) async fn run_spec(client: &Client, spec: &Spec) -> Vec<TargetOutcome> {
    let mut outcomes = Vec::with_capacity(spec.requests().len());
    for target in spec.requests() {
        let result = match RequestPlan::from_target(target) {
            Ok(plan) => execute_plan(client, &plan).await,
            Err(err) => Err(err),
        };
        match &result {
            Ok(sent) if sent.has_error() => warn!("Request '{}' failed to send", target.id()),
            Ok(_) => debug!("Request '{}' completed", target.id()),
            Err(err) => warn!("Request '{}' failed: {}", target.id(), err),
        }
        outcomes.push(TargetOutcome {
            id: target.id().to_owned(),
            method: target.method().to_owned(),
            url: target.url().to_owned(),
            result,
        });
    }
    outcomes
}

/// Builds, optionally signs, and sends one request.
///
/// JSON bodies get `Content-Type: application/json` unless a content type
/// is already set. The response body is read before returning.
///
/// # Errors
///
/// Returns an error when the request cannot be built or signed; nothing is
/// sent in that case.
pub(crate) async fn execute_plan(client: &Client, plan: &RequestPlan) -> AppResult<RequestResult> {
    let body = plan
        .body
        .as_ref()
        .map(serde_json::to_vec)
        .transpose()
        .map_err(|err| AppError::build(BuildError::EncodeBody { source: err }))?;

    let mut headers = header_map(&plan.headers)?;
    if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let mut request = client.build(&plan.method, &plan.url, body.as_deref(), Some(headers))?;
    if let Some(config) = plan.signing.as_ref() {
        client.sign(&mut request, body.as_deref().unwrap_or_default(), config)?;
    }

    let mut result = client.send(request).await;
    if result.successful()
        && let Err(err) = result.body().await
    {
        warn!("Failed to read response body: {}", err);
    }
    Ok(result)
}
