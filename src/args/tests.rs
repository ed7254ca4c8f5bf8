use std::time::Duration;

use clap::Parser;

use super::parsers::{parse_duration_arg, parse_header, parse_json_body};
use super::*;
use crate::error::{BuildError, ValidationError};

fn parse(args: &[&str]) -> Result<CliArgs, String> {
    CliArgs::try_parse_from(args).map_err(|err| err.to_string())
}

#[test]
fn parse_header_splits_on_first_colon() -> Result<(), String> {
    let (key, value) = parse_header("Authorization: Bearer a:b").map_err(|err| err.to_string())?;
    if key != "Authorization" || value != "Bearer a:b" {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    match parse_header("no-colon") {
        Err(ValidationError::InvalidHeaderFormat { value }) if value == "no-colon" => {}
        other => return Err(format!("Unexpected result: {:?}", other)),
    }
    match parse_header("  : orphan") {
        Err(ValidationError::InvalidHeaderFormat { .. }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn parse_json_body_rejects_invalid_json() -> Result<(), String> {
    let value = parse_json_body(r#"{"a": [1, 2]}"#).map_err(|err| err.to_string())?;
    if value.get("a").and_then(serde_json::Value::as_array).map(Vec::len) != Some(2) {
        return Err(format!("Unexpected body: {}", value));
    }
    if !matches!(
        parse_json_body("{not json"),
        Err(ValidationError::InvalidJsonBody { .. })
    ) {
        return Err("Expected invalid JSON error".to_owned());
    }
    Ok(())
}

#[test]
fn parse_duration_accepts_compound_values() -> Result<(), String> {
    let cases = [
        ("30", Duration::from_secs(30)),
        (" 250ms ", Duration::from_millis(250)),
        ("1m30s", Duration::from_secs(90)),
        ("1h2m3s", Duration::from_secs(3_723)),
        ("2s500ms", Duration::from_millis(2_500)),
        ("1s1us1ns", Duration::new(1, 1_001)),
        ("750µs", Duration::from_micros(750)),
        ("0h5s", Duration::from_secs(5)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration_arg(raw).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("'{}' parsed to {:?}", raw, parsed));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_invalid_values() -> Result<(), String> {
    let cases: [(&str, fn(&ValidationError) -> bool); 7] = [
        ("", |err| matches!(err, ValidationError::DurationEmpty)),
        ("ms", |err| {
            matches!(err, ValidationError::InvalidDurationFormat { .. })
        }),
        ("1m30", |err| {
            matches!(err, ValidationError::InvalidDurationFormat { .. })
        }),
        ("5d", |err| {
            matches!(err, ValidationError::InvalidDurationUnit { unit } if unit == "d")
        }),
        ("0s0ms", |err| matches!(err, ValidationError::DurationZero)),
        ("99999999999999999999s", |err| {
            matches!(err, ValidationError::InvalidDurationNumber { .. })
        }),
        ("18446744073709551615h", |err| {
            matches!(err, ValidationError::DurationOverflow)
        }),
    ];
    for (raw, expected) in cases {
        match parse_duration_arg(raw) {
            Err(err) if expected(&err) => {}
            other => return Err(format!("Unexpected result for '{}': {:?}", raw, other)),
        }
    }
    Ok(())
}

#[test]
fn http_method_from_str_normalizes() -> Result<(), String> {
    let method: HttpMethod = " patch ".parse().map_err(|err: BuildError| err.to_string())?;
    if method != HttpMethod::Patch || method.to_string() != "PATCH" {
        return Err(format!("Unexpected method: {}", method));
    }
    match "what".parse::<HttpMethod>() {
        Err(BuildError::UnsupportedMethod { method }) if method == "WHAT" => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn cli_parses_run_command_with_globals() -> Result<(), String> {
    let args = parse(&[
        "httpreq",
        "run",
        "smoke.toml",
        "--timeout",
        "5s",
        "--output-format",
        "json",
        "--fail-on-status",
        "-v",
    ])?;
    match &args.command {
        Command::Run(run) if run.file == "smoke.toml" => {}
        other => return Err(format!("Unexpected command: {:?}", other)),
    }
    if args.request_timeout != Duration::from_secs(5)
        || args.output_format != OutputFormat::Json
        || !args.fail_on_status
        || !args.verbose
    {
        return Err(format!("Unexpected globals: {:?}", args));
    }
    Ok(())
}

#[test]
fn cli_parses_single_request_command() -> Result<(), String> {
    let args = parse(&[
        "httpreq",
        "post",
        ":8080/items",
        "-H",
        "X-Env: test",
        "--header",
        "Accept: application/json",
        "--json",
        r#"{"name": "widget"}"#,
        "--aws",
        "--region",
        "us-east-1",
    ])?;
    let Command::Post(request) = &args.command else {
        return Err(format!("Unexpected command: {:?}", args.command));
    };
    if request.url != ":8080/items" || request.headers.len() != 2 {
        return Err(format!("Unexpected request args: {:?}", request));
    }
    if request.json.is_none() || !request.aws || request.region.as_deref() != Some("us-east-1") {
        return Err(format!("Unexpected request args: {:?}", request));
    }
    Ok(())
}

#[test]
fn cli_region_requires_aws() -> Result<(), String> {
    if parse(&["httpreq", "get", "localhost", "--region", "us-east-1"]).is_ok() {
        return Err("--region without --aws should be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn cli_rejects_invalid_header() -> Result<(), String> {
    if parse(&["httpreq", "get", "localhost", "-H", "missing-colon"]).is_ok() {
        return Err("Header without colon should be rejected".to_owned());
    }
    Ok(())
}
