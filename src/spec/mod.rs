//! Request spec documents: decoding shapes, validation and default headers.
mod document;
mod signing;
mod target;


pub use document::Spec;
pub use signing::{
    AwsSignConfig, DEFAULT_PROFILE, DEFAULT_REGION, DEFAULT_SERVICE, SigningDirective,
};
pub use target::{RequestTarget, SPEC_METHODS};
