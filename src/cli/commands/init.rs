use std::{fs, path::Path};

use anyhow::Result;
use colored::Colorize;

use crate::cli::exit_status::ExitStatus;
use crate::cli::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_settings_json};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_settings_json()?)?;
    println!("{} Created {}", SUCCESS_MARK.green(), CONFIG_FILE_NAME);
    Ok(ExitStatus::Success)
}
