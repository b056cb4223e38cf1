use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const MAIN_GO: &str = "package main

func main() {
\t// TRANSLATORS: greeting
\tG(\"hello\")
\tG(\"bye\")
}
";

fn setup(config: &str) -> Result<CliTest> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_callers("callers.json", &["main.go:6:3", "main.go:5:3"])?;
    test.write_file(".gurutextrc.json", config)?;
    Ok(test)
}

#[test]
fn test_config_file_options() -> Result<()> {
    let test = setup(r#"{ "comment": "TRANSLATORS:", "sort": true }"#)?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "#: main.go:6:3\n\
         msgid \"bye\"\n\
         msgstr \"\"\n\
         \n\
         #. TRANSLATORS: greeting\n\
         #: main.go:5:3\n\
         msgid \"hello\"\n\
         msgstr \"\"\n\
         \n"
    );

    Ok(())
}

#[test]
fn test_command_line_overrides_config_file() -> Result<()> {
    let test = setup(r#"{ "comment": "TRANSLATORS:", "ignore": "greeting" }"#)?;

    let output = run(test.extract_command().args(["--ignore", "NOTHING"]))?;

    assert!(output.stdout.contains("msgid \"hello\""));
    assert_eq!(output.stderr, "");

    let output = run(&mut test.extract_command())?;
    assert!(!output.stdout.contains("msgid \"hello\""));
    assert!(output.stderr.starts_with("NOTE: call ignored"));

    Ok(())
}

#[test]
fn test_config_flag_selects_file() -> Result<()> {
    let test = setup("{}")?;
    test.write_file("custom.json", r#"{ "exclude": "main\\.go$" }"#)?;

    let output = run(test.extract_command().args(["--config", "custom.json"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "");

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = setup(r#"{ "exclude": "(" }"#)?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.starts_with("Error: Invalid regex in 'exclude'"));

    Ok(())
}

#[test]
fn test_verbose_notes() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_callers("callers.json", &["main.go:5:3"])?;

    let output = run(test.extract_command().arg("--verbose"))?;

    assert!(
        output
            .stderr
            .contains("Note: No .gurutextrc.json found, using default configuration")
    );
    assert!(output.stderr.contains("Note: Found 1 call site(s)"));
    assert!(output.stderr.contains("Extracted 1 message(s) from 1 file(s)"));

    Ok(())
}
