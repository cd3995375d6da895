use anyhow::Result;

use super::{build_scope, build_settings};
use crate::cli::args::LookupCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report;
use crate::core::{DataBackend, ResolutionType, Router};

pub fn lookup(cmd: LookupCommand) -> Result<ExitStatus> {
    let settings = build_settings(&cmd.args)?;
    let scope = build_scope(&cmd.args)?;
    let router = Router::new(settings)?;

    let resolution: ResolutionType = cmd.resolution.into();
    match router.lookup(&cmd.key, &scope, cmd.order_override.as_deref(), &resolution)? {
        Some(answer) => {
            report::print_answer(&answer)?;
            Ok(ExitStatus::Success)
        }
        None => {
            report::print_not_found(&cmd.key);
            Ok(ExitStatus::Failure)
        }
    }
}
