use serde::Deserialize;

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_SERVICE: &str = "execute-api";

/// Resolved SigV4 settings for one request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSignConfig {
    /// Credential profile name; empty means implicit/environment credentials.
    pub profile: String,
    pub region: String,
    pub service: String,
}

impl AwsSignConfig {
    #[must_use]
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
            service: DEFAULT_SERVICE.to_owned(),
        }
    }

    /// Settings used by the `aws = true` / `aws = "..."` shorthand.
    #[must_use]
    pub fn shorthand() -> Self {
        Self::new(String::new(), DEFAULT_REGION)
    }
}

/// The `aws` field of a request, decoded once from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<RawSigning>")]
pub enum SigningDirective {
    #[default]
    NoSigning,
    ShorthandSigning,
    ConfiguredSigning {
        profile: Option<String>,
        region: Option<String>,
        service: Option<String>,
    },
}

impl SigningDirective {
    pub(crate) fn resolve(&self) -> Option<AwsSignConfig> {
        match self {
            SigningDirective::NoSigning => None,
            SigningDirective::ShorthandSigning => Some(AwsSignConfig::shorthand()),
            SigningDirective::ConfiguredSigning {
                profile,
                region,
                service,
            } => Some(AwsSignConfig {
                profile: profile.clone().unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
                region: region.clone().unwrap_or_else(|| DEFAULT_REGION.to_owned()),
                service: service.clone().unwrap_or_else(|| DEFAULT_SERVICE.to_owned()),
            }),
        }
    }
}

/// Only the shape of a boolean or string value matters; both select the
/// shorthand. Numbers and arrays match no variant and fail to decode.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSigning {
    Flag(
        #[expect(dead_code, reason = "any boolean selects the shorthand")]
        bool,
    ),
    Named(
        #[expect(dead_code, reason = "any string selects the shorthand")]
        String,
    ),
    Configured {
        profile: Option<String>,
        region: Option<String>,
        service: Option<String>,
    },
}

impl From<Option<RawSigning>> for SigningDirective {
    fn from(raw: Option<RawSigning>) -> Self {
        match raw {
            None => SigningDirective::NoSigning,
            Some(RawSigning::Flag(_) | RawSigning::Named(_)) => SigningDirective::ShorthandSigning,
            Some(RawSigning::Configured {
                profile,
                region,
                service,
            }) => SigningDirective::ConfiguredSigning {
                profile,
                region,
                service,
            },
        }
    }
}
