use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, a value was found
/// - `Failure` (1): Command completed but nothing was found
/// - `Error` (2): Command failed (syntax error, type mismatch, config error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, a value was found.
    Success,
    /// Command completed but nothing was found.
    Failure,
    /// Command failed due to an error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
