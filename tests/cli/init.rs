use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr_of, stdout_of};

/// Validates settings file structure and default values.
fn assert_settings_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Settings should be valid JSON")?;

    assert!(
        parsed.get("hierarchy").is_some(),
        "Settings should have 'hierarchy' field"
    );
    assert!(
        parsed.get("datadir").is_some(),
        "Settings should have 'datadir' field"
    );
    assert!(
        parsed.get("router").is_some(),
        "Settings should have 'router' field"
    );

    // Verify formatting (2-space indentation)
    assert!(
        content.contains("  "),
        "Settings should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_settings_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Created .tierrc.json"));

    assert!(test.root().join(".tierrc.json").exists());

    let content = test.read_file(".tierrc.json")?;
    assert_settings_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tierrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("already exists"));

    Ok(())
}

#[test]
fn test_init_settings_are_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("data/common.json", r#"{ "motd": "hello" }"#)?;

    let output = test.lookup_command("motd").output()?;
    assert!(
        output.status.success(),
        "Lookup should work with initialized settings. stderr: {}",
        stderr_of(&output)
    );
    assert_eq!(stdout_of(&output).trim(), "\"hello\"");

    Ok(())
}
