use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::Request;

use crate::error::SignError;
use crate::spec::DEFAULT_REGION;

const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
const SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Resolves static credentials from the process environment.
///
/// # Errors
///
/// Returns [`SignError::MissingCredentials`] when the access key id or
/// secret access key is unset or empty.
pub fn credentials_from_env() -> Result<Credentials, SignError> {
    credentials_from_lookup(|name| std::env::var(name).ok())
}

pub(crate) fn credentials_from_lookup<F>(lookup: F) -> Result<Credentials, SignError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
    let access_key = non_empty(ACCESS_KEY_ID).ok_or(SignError::MissingCredentials {
        variable: ACCESS_KEY_ID,
    })?;
    let secret_key = non_empty(SECRET_ACCESS_KEY).ok_or(SignError::MissingCredentials {
        variable: SECRET_ACCESS_KEY,
    })?;
    let session_token = non_empty(SESSION_TOKEN);
    Ok(Credentials::new(
        access_key,
        secret_key,
        session_token,
        None,
        "httpreq-env",
    ))
}

/// Computes a SigV4 signature and attaches the signing headers to `request`.
///
/// The request is only modified once signing has fully succeeded.
pub(crate) fn sign_request(
    request: &mut Request,
    body: &[u8],
    credentials: &Credentials,
    region: &str,
    service: &str,
    time: SystemTime,
) -> Result<(), SignError> {
    let region = if region.is_empty() {
        DEFAULT_REGION
    } else {
        region
    };

    let identity: Identity = credentials.clone().into();
    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(service)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(|err| SignError::SigV4Params {
            source: Box::new(err),
        })?
        .into();

    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| value.to_str().map(|value| (name.as_str(), value)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| SignError::SigV4Request {
            source: Box::new(err),
        })?;

    let signable = SignableRequest::new(
        request.method().as_str(),
        request.url().as_str(),
        headers.iter().copied(),
        SignableBody::Bytes(body),
    )
    .map_err(|err| SignError::SigV4Request {
        source: Box::new(err),
    })?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .map_err(|err| SignError::SigV4Sign {
            source: Box::new(err),
        })?
        .into_parts();

    let mut http_req = http::Request::builder()
        .method(request.method().as_str())
        .uri(request.url().as_str());
    for (name, value) in &headers {
        http_req = http_req.header(*name, *value);
    }
    let mut http_req = http_req.body(()).map_err(|err| SignError::SigV4BuildSign {
        source: Box::new(err),
    })?;
    instructions.apply_to_request_http1x(&mut http_req);

    for (name, value) in http_req.headers() {
        request.headers_mut().insert(name.clone(), value.clone());
    }
    Ok(())
}
