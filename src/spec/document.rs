use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::ValidationError;

use super::target::RequestTarget;

/// A spec document: default headers plus the ordered request targets.
#[derive(Debug, Default, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub requests: Option<Vec<RequestTarget>>,
}

impl Spec {
    #[must_use]
    pub fn new(headers: BTreeMap<String, String>, requests: Vec<RequestTarget>) -> Self {
        Self {
            headers,
            requests: Some(requests),
        }
    }

    /// Validates every request in order and stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequests`] or
    /// [`ValidationError::EmptyRequests`] for a missing or empty request
    /// list, otherwise the first per-request validation error.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let requests = self
            .requests
            .as_mut()
            .ok_or(ValidationError::MissingRequests)?;
        if requests.is_empty() {
            return Err(ValidationError::EmptyRequests);
        }

        let mut ids = HashSet::with_capacity(requests.len());
        for request in requests.iter_mut() {
            request.validate(&mut ids)?;
        }
        Ok(())
    }

    /// Copies spec-level headers into every request that does not set them.
    pub fn apply_default_headers(&mut self) {
        let Some(requests) = self.requests.as_mut() else {
            return;
        };
        for (name, value) in &self.headers {
            for request in requests.iter_mut() {
                request.set_header_if_absent(name, value);
            }
        }
    }

    #[must_use]
    pub fn requests(&self) -> &[RequestTarget] {
        self.requests.as_deref().unwrap_or_default()
    }
}
