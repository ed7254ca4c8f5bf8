use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::load_spec_file;
use crate::error::{AppError, AppResult, ConfigError};
use crate::spec::AwsSignConfig;

fn write_spec(name: &str, content: &str) -> AppResult<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok((dir, path))
}

#[test]
fn loads_toml_spec() -> AppResult<()> {
    let (_dir, path) = write_spec(
        "smoke.toml",
        r#"
[headers]
Accept = "application/json"

[[requests]]
id = "status"
url = ":8080/status"

[[requests]]
id = "create"
method = "post"
url = ":8080/items"
body = { name = "widget", tags = ["a", "b"] }
aws = { region = "us-east-1" }
"#,
    )?;

    let spec = load_spec_file(&path)?;
    if spec.headers.get("Accept").map(String::as_str) != Some("application/json") {
        return Err(AppError::config("Default headers were not decoded"));
    }
    let requests = spec.requests();
    let [status, create] = requests else {
        return Err(AppError::config(format!(
            "Expected 2 requests, got {}",
            requests.len()
        )));
    };
    if status.id() != "status" || status.body().is_some() {
        return Err(AppError::config("Unexpected first request"));
    }
    let tags = create
        .body()
        .and_then(|body| body.get("tags"))
        .and_then(serde_json::Value::as_array)
        .map(Vec::len);
    if tags != Some(2) {
        return Err(AppError::config("Body was not decoded as a document"));
    }
    Ok(())
}

#[test]
fn loads_json_spec() -> AppResult<()> {
    let (_dir, path) = write_spec(
        "smoke.json",
        r#"{"requests": [{"id": "a", "url": "localhost", "aws": true}]}"#,
    )?;

    let mut spec = load_spec_file(&path)?;
    spec.validate()?;
    let signed = spec
        .requests()
        .first()
        .and_then(|request| request.signing())
        .is_some();
    if !signed {
        return Err(AppError::config("Shorthand signing was not resolved"));
    }
    Ok(())
}

#[test]
fn missing_requests_key_decodes_as_absent() -> AppResult<()> {
    let (_dir, path) = write_spec("empty.json", r#"{"headers": {"X-A": "1"}}"#)?;
    let spec = load_spec_file(&path)?;
    if spec.requests.is_some() {
        return Err(AppError::config("Absent requests must stay absent"));
    }
    Ok(())
}

#[test]
fn loads_yaml_spec_with_every_signing_shape() -> AppResult<()> {
    let (_dir, path) = write_spec(
        "smoke.yml",
        r#"
headers:
  Accept: application/json
requests:
  - id: flag
    url: localhost/a
    aws: true
  - id: named
    url: localhost/b
    aws: "anything"
  - id: configured
    method: post
    url: localhost/c
    body:
      name: widget
    aws:
      profile: dev
      region: us-east-1
  - id: plain
    url: localhost/d
"#,
    )?;

    let mut spec = load_spec_file(&path)?;
    spec.validate()?;
    let signing: Vec<Option<AwsSignConfig>> = spec
        .requests()
        .iter()
        .map(|request| request.signing().cloned())
        .collect();
    let expected = vec![
        Some(AwsSignConfig::shorthand()),
        Some(AwsSignConfig::shorthand()),
        Some(AwsSignConfig::new("dev", "us-east-1")),
        None,
    ];
    if signing != expected {
        return Err(AppError::config(format!("Unexpected signing: {:?}", signing)));
    }
    if spec.headers.get("Accept").map(String::as_str) != Some("application/json") {
        return Err(AppError::config("Default headers were not decoded"));
    }
    Ok(())
}

#[test]
fn yaml_parse_errors_carry_the_path() -> AppResult<()> {
    let (_dir, path) = write_spec("broken.yaml", "requests:\n  - id: a\n    aws: 3\n")?;
    match load_spec_file(&path) {
        Err(AppError::Config(ConfigError::ParseYaml { path: reported, .. })) if reported == path => {
            Ok(())
        }
        other => Err(AppError::config(format!("Unexpected result: {:?}", other))),
    }
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let (_dir, path) = write_spec("spec.ini", "requests = []")?;
    match load_spec_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "ini" => {
            Ok(())
        }
        other => Err(AppError::config(format!("Unexpected result: {:?}", other))),
    }
}

#[test]
fn missing_extension_is_rejected() -> AppResult<()> {
    let (_dir, path) = write_spec("spec", "{}")?;
    match load_spec_file(&path) {
        Err(AppError::Config(ConfigError::MissingExtension)) => Ok(()),
        other => Err(AppError::config(format!("Unexpected result: {:?}", other))),
    }
}

#[test]
fn parse_errors_carry_the_path() -> AppResult<()> {
    let (_dir, path) = write_spec("broken.toml", "[[requests]\nid = ")?;
    match load_spec_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { path: reported, .. })) if reported == path => {
            Ok(())
        }
        other => Err(AppError::config(format!("Unexpected result: {:?}", other))),
    }
}

#[test]
fn unreadable_file_is_reported() -> AppResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing.toml");
    match load_spec_file(&path) {
        Err(AppError::Config(ConfigError::ReadSpec { .. })) => Ok(()),
        other => Err(AppError::config(format!("Unexpected result: {:?}", other))),
    }
}
