use anyhow::Result;

use super::{build_scope, build_settings};
use crate::cli::args::SourcesCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report;
use crate::core::Router;

pub fn sources(cmd: SourcesCommand) -> Result<ExitStatus> {
    let settings = build_settings(&cmd.args)?;
    let scope = build_scope(&cmd.args)?;
    let router = Router::new(settings)?;

    let statuses = router.sources(&scope);
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        report::print_sources(&statuses);
    }

    if statuses.iter().any(|status| status.exists) {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
