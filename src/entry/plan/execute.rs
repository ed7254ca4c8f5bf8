use std::path::Path;

use tracing::debug;

use crate::app::{TargetOutcome, execute_plan as execute_request, print_outcomes, run_spec};
use crate::config::load_spec_file;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{Client, ClientSettings};

use super::types::{ClientPlan, OutputPlan, RunPlan};

pub(in crate::entry) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Spec {
            client,
            output,
            file,
        } => {
            let mut spec = load_spec_file(&file)?;
            spec.validate()?;
            spec.apply_default_headers();
            debug!("Spec '{}' is valid", file.display());

            let client = build_client(&client)?;
            let outcomes = run_spec(&client, &spec).await;
            finish(&outcomes, &output)
        }
        RunPlan::Single {
            client,
            output,
            request,
        } => {
            let client = build_client(&client)?;
            let result = execute_request(&client, &request).await;
            let outcomes = vec![TargetOutcome {
                id: "request".to_owned(),
                method: request.method.clone(),
                url: request.url.to_string(),
                result,
            }];
            finish(&outcomes, &output)
        }
    }
}

fn build_client(plan: &ClientPlan) -> AppResult<Client> {
    let mut client = Client::new(ClientSettings::default())?;
    client.set_timeout(plan.timeout)?;
    if let Some((cert, key)) = plan.identity.as_ref() {
        client.set_cert(Path::new(cert), Path::new(key))?;
    }
    Ok(client)
}

fn finish(outcomes: &[TargetOutcome], output: &OutputPlan) -> AppResult<()> {
    print_outcomes(outcomes, output.format, output.show_headers)?;
    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.is_failure(output.fail_on_status))
        .count();
    if failed > 0 {
        return Err(AppError::validation(ValidationError::RequestsFailed {
            failed,
        }));
    }
    Ok(())
}
