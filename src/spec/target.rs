use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::args::HttpMethod;
use crate::error::ValidationError;
use crate::http::parse_url;

use super::signing::{AwsSignConfig, SigningDirective};

/// Methods a spec document may declare.
pub const SPEC_METHODS: [HttpMethod; 3] = [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete];

/// One request entry of a spec document.
///
/// Decoded loosely from the document, then normalized in place by
/// [`RequestTarget::validate`]. After validation `id`, `method` and the
/// resolved signing settings are fixed; headers may still receive spec
/// defaults through [`RequestTarget::set_header_if_absent`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestTarget {
    #[serde(default)]
    id: String,
    #[serde(default)]
    method: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    body: Option<serde_json::Value>,
    #[serde(default, rename = "aws")]
    directive: SigningDirective,
    #[serde(skip)]
    signing: Option<AwsSignConfig>,
}

impl RequestTarget {
    #[must_use]
    pub fn new(id: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_signing(mut self, directive: SigningDirective) -> Self {
        self.directive = directive;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Signing settings resolved during validation.
    #[must_use]
    pub const fn signing(&self) -> Option<&AwsSignConfig> {
        self.signing.as_ref()
    }

    /// Sets a header unless the request already carries one with the same
    /// (case-insensitive) name.
    pub fn set_header_if_absent(&mut self, name: &str, value: &str) {
        let present = self
            .headers
            .keys()
            .any(|existing| existing.eq_ignore_ascii_case(name));
        if !present {
            self.headers.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Validates and normalizes the target, registering its id in `ids`.
    ///
    /// # Errors
    ///
    /// Returns the first failed check: id shape, id uniqueness, method,
    /// URL, and body presence for POST.
    pub fn validate(&mut self, ids: &mut HashSet<String>) -> Result<(), ValidationError> {
        if self.id.is_empty() || self.id.chars().any(char::is_whitespace) {
            return Err(ValidationError::MissingOrInvalidId {
                id: self.id.clone(),
            });
        }
        if ids.contains(&self.id) {
            return Err(ValidationError::DuplicateId {
                id: self.id.clone(),
            });
        }

        let method = if self.method.is_empty() {
            HttpMethod::Get.as_str().to_owned()
        } else {
            self.method.to_ascii_uppercase()
        };
        if !SPEC_METHODS
            .iter()
            .any(|allowed| allowed.as_str() == method)
        {
            return Err(ValidationError::InvalidMethod {
                method: self.method.clone(),
            });
        }
        self.method = method;

        parse_url(&self.url)?;

        if self.method == HttpMethod::Post.as_str() && self.body.is_none() {
            return Err(ValidationError::MissingBody {
                id: self.id.clone(),
            });
        }

        self.signing = self.directive.resolve();
        debug!(
            id = %self.id,
            method = %self.method,
            signed = self.signing.is_some(),
            "Validated request target"
        );

        ids.insert(self.id.clone());
        Ok(())
    }
}
