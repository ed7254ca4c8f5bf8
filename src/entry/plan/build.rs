use std::path::PathBuf;

use crate::app::RequestPlan;
use crate::args::{CliArgs, Command, HttpMethod, RequestArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::parse_url;
use crate::spec::AwsSignConfig;

use super::types::{ClientPlan, OutputPlan, RunPlan};

pub(in crate::entry) fn build_plan(args: CliArgs) -> AppResult<RunPlan> {
    let client = client_plan(&args)?;
    let output = OutputPlan {
        format: args.output_format,
        show_headers: args.show_headers,
        fail_on_status: args.fail_on_status,
    };

    let (method, request) = match args.command {
        Command::Run(run) => {
            return Ok(RunPlan::Spec {
                client,
                output,
                file: PathBuf::from(run.file),
            });
        }
        Command::Get(request) => (HttpMethod::Get, request),
        Command::Head(request) => (HttpMethod::Head, request),
        Command::Post(request) => (HttpMethod::Post, request),
        Command::Put(request) => (HttpMethod::Put, request),
        Command::Patch(request) => (HttpMethod::Patch, request),
        Command::Delete(request) => (HttpMethod::Delete, request),
    };
    Ok(RunPlan::Single {
        client,
        output,
        request: Box::new(single_request(method, request)?),
    })
}

fn client_plan(args: &CliArgs) -> AppResult<ClientPlan> {
    let identity = match (args.cert.as_ref(), args.key.as_ref()) {
        (Some(cert), Some(key)) => Some((PathBuf::from(cert), PathBuf::from(key))),
        (Some(_), None) => return Err(AppError::validation(ValidationError::CertRequiresKey)),
        (None, Some(_)) => return Err(AppError::validation(ValidationError::KeyRequiresCert)),
        (None, None) => None,
    };
    Ok(ClientPlan {
        timeout: args.request_timeout,
        identity,
    })
}

fn single_request(method: HttpMethod, args: RequestArgs) -> AppResult<RequestPlan> {
    let url = parse_url(&args.url).map_err(AppError::validation)?;
    let signing = if args.aws {
        let mut config = AwsSignConfig::shorthand();
        if let Some(region) = args.region {
            config.region = region;
        }
        if let Some(profile) = args.profile {
            config.profile = profile;
        }
        Some(config)
    } else {
        None
    };
    Ok(RequestPlan::single(
        method,
        url,
        args.headers.into_iter().collect(),
        args.json,
        signing,
    ))
}
