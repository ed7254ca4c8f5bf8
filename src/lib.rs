//! Core library for the `httpreq` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, spec document loading and validation, request building with
//! optional AWS SigV4 signing, and request dispatch with connection tracing.
//! The primary user-facing interface is the `httpreq` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod spec;
