use std::path::PathBuf;
use std::time::Duration;

use crate::app::RequestPlan;
use crate::args::OutputFormat;

pub(in crate::entry) struct ClientPlan {
    pub(super) timeout: Duration,
    pub(super) identity: Option<(PathBuf, PathBuf)>,
}

pub(in crate::entry) struct OutputPlan {
    pub(super) format: OutputFormat,
    pub(super) show_headers: bool,
    pub(super) fail_on_status: bool,
}

pub(in crate::entry) enum RunPlan {
    Spec {
        client: ClientPlan,
        output: OutputPlan,
        file: PathBuf,
    },
    Single {
        client: ClientPlan,
        output: OutputPlan,
        request: Box<RequestPlan>,
    },
}
