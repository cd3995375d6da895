use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr_of, stdout_of};

fn setup_hierarchy(test: &CliTest) -> Result<()> {
    test.write_file(
        ".tierrc.json",
        r#"{
            "hierarchy": ["nodes/%{node}", "common"],
            "datadir": "data"
        }"#,
    )?;
    test.write_file(
        "data/common.json",
        r#"{
            "db": { "host": "db01", "port": 5432 },
            "ntp": ["common1", "common2"],
            "motd": "welcome to %{node}"
        }"#,
    )?;
    test.write_file(
        "data/nodes/web01.json",
        r#"{
            "db": { "host": "web01-db" },
            "ntp": ["node1"]
        }"#,
    )?;
    Ok(())
}

fn parsed_stdout(output: &std::process::Output) -> Value {
    serde_json::from_str(&stdout_of(output)).expect("stdout should be JSON")
}

#[test]
fn test_lookup_scalar() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test.lookup_command("db.host").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(parsed_stdout(&output), json!("db01"));
    Ok(())
}

#[test]
fn test_lookup_first_prefers_higher_hierarchy_level() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test
        .lookup_command("db.host")
        .args(["-s", "node=web01"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(parsed_stdout(&output), json!("web01-db"));
    Ok(())
}

#[test]
fn test_lookup_interpolates_scope() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test
        .lookup_command("motd")
        .args(["-s", "node=app42"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(parsed_stdout(&output), json!("welcome to app42"));
    Ok(())
}

#[test]
fn test_lookup_hash_merges_across_levels() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test
        .lookup_command("db")
        .args(["-s", "node=web01", "--resolution", "hash"])
        .output()?;
    assert!(output.status.success());
    // The node level wins on host; common contributes port.
    assert_eq!(
        parsed_stdout(&output),
        json!({"host": "web01-db", "port": 5432})
    );
    Ok(())
}

#[test]
fn test_lookup_array_collects_across_levels() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test
        .lookup_command("ntp")
        .args(["-s", "node=web01", "--resolution", "array"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        parsed_stdout(&output),
        json!([["node1"], ["common1", "common2"]])
    );
    Ok(())
}

#[test]
fn test_lookup_quoted_segment() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tierrc.json", r#"{ "hierarchy": ["common"] }"#)?;
    test.write_file(
        "data/common.json",
        r#"{ "db": { "driver.options": { "timeout": 30 } } }"#,
    )?;

    let output = test.lookup_command(r#"db."driver.options".timeout"#).output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(parsed_stdout(&output), json!(30));
    Ok(())
}

#[test]
fn test_lookup_missing_key_exits_failure() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test.lookup_command("nonexistent").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("no data source provides"));
    Ok(())
}

#[test]
fn test_lookup_syntax_error_exits_error() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test.lookup_command("a..b.").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("syntax error"));
    Ok(())
}

#[test]
fn test_lookup_type_mismatch_exits_error() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test
        .lookup_command("motd")
        .args(["--resolution", "hash"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("type mismatch"));
    Ok(())
}

#[test]
fn test_lookup_missing_subkey_exits_error() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;

    let output = test.lookup_command("db.missing").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("subkey 'missing' not found"));
    Ok(())
}

#[test]
fn test_lookup_order_override() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;
    test.write_file("data/emergency.json", r#"{ "db": { "host": "fallback" } }"#)?;

    let output = test
        .lookup_command("db.host")
        .args(["--order-override", "emergency"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(parsed_stdout(&output), json!("fallback"));
    Ok(())
}

#[test]
fn test_lookup_scope_file() -> Result<()> {
    let test = CliTest::new()?;
    setup_hierarchy(&test)?;
    test.write_file("scope.json", r#"{ "node": "web01" }"#)?;

    let output = test
        .lookup_command("db.host")
        .args(["--scope-file", "scope.json"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(parsed_stdout(&output), json!("web01-db"));
    Ok(())
}

#[test]
fn test_lookup_with_explicit_config_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/tier.json", r#"{ "hierarchy": ["common"], "datadir": "data" }"#)?;
    test.write_file("data/common.json", r#"{ "key": "value" }"#)?;

    let output = test
        .lookup_command("key")
        .args(["--config", "conf/tier.json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(parsed_stdout(&output), json!("value"));
    Ok(())
}

#[test]
fn test_lookup_delegates_to_configured_backend() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{
            "hierarchy": ["common"],
            "datadir": "data",
            "router": {
                "backends": {
                    "secrets": { "backend_class": "json", "backend_key": "secrets" }
                }
            },
            "secrets": { "datadir": "secrets-data" }
        }"#,
    )?;
    test.write_file(
        "data/common.json",
        r#"{ "db": { "host": "db01", "password": "backend[secrets]" } }"#,
    )?;
    test.write_file(
        "secrets-data/common.json",
        r#"{ "db": { "password": "s3cret" } }"#,
    )?;

    let output = test.lookup_command("db").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        parsed_stdout(&output),
        json!({"host": "db01", "password": "s3cret"})
    );
    Ok(())
}

#[test]
fn test_lookup_unregistered_backend_passes_through_with_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tierrc.json", r#"{ "hierarchy": ["common"] }"#)?;
    test.write_file("data/common.json", r#"{ "token": "backend[vault,extra]" }"#)?;

    let output = test.lookup_command("token").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(parsed_stdout(&output), json!("backend[vault,extra]"));
    assert!(stderr_of(&output).contains("was not configured"));
    Ok(())
}

#[test]
fn test_lookup_broken_document_is_skipped() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tierrc.json",
        r#"{ "hierarchy": ["broken", "common"], "datadir": "data" }"#,
    )?;
    test.write_file("data/broken.json", "{ this is not json")?;
    test.write_file("data/common.json", r#"{ "key": "value" }"#)?;

    let output = test.lookup_command("key").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(parsed_stdout(&output), json!("value"));
    Ok(())
}
