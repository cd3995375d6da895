use anyhow::Result;

use crate::{CliTest, stderr_of, stdout_of};

#[test]
fn test_sources_lists_hierarchy_with_marks() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{ "hierarchy": ["nodes/%{node}", "common"], "datadir": "data" }"#,
    )?;
    test.write_file("data/common.json", "{}")?;

    let output = test
        .sources_command()
        .args(["-s", "node=web01"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("nodes/web01"));
    assert!(stdout.contains("✘"));
    assert!(stdout.contains("common"));
    assert!(stdout.contains("✓"));
    assert!(stdout.contains("(not found)"));
    Ok(())
}

#[test]
fn test_sources_respects_router_paths_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{
            "hierarchy": ["common"],
            "datadir": "data",
            "router": { "paths": ["special"] }
        }"#,
    )?;
    test.write_file("data/special.json", "{}")?;

    let output = test.sources_command().output()?;
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("special"));
    assert!(!stdout.contains("common"));
    Ok(())
}

#[test]
fn test_sources_json_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{ "hierarchy": ["common"], "datadir": "data" }"#,
    )?;
    test.write_file("data/common.json", "{}")?;

    let output = test.sources_command().arg("--json").output()?;
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
    let statuses = parsed.as_array().expect("expected a JSON array");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["source"], "common");
    assert_eq!(statuses[0]["exists"], true);
    Ok(())
}

#[test]
fn test_sources_without_any_documents_exits_failure() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{ "hierarchy": ["nodes/%{node}", "common"], "datadir": "data" }"#,
    )?;

    let output = test.sources_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}
