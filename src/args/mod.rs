//! CLI argument types and parsing helpers.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{CliArgs, Command, RequestArgs, RunArgs};
pub use types::{HttpMethod, OutputFormat};
