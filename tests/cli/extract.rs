use std::io::Write;
use std::process::Stdio;

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const MAIN_GO: &str = "package main

import \"example.com/app/i18n\"

func main() {
\ti18n.G(\"one\")
\ti18n.G(\"two\" + \" \" + \"three\")
\ti18n.G(hello)
\ti18n.G(`01 multi
02 line`)
}
";

#[test]
fn test_extract_messages() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_callers(
        "callers.json",
        &["main.go:6:8", "main.go:7:8", "main.go:8:8", "main.go:9:8", "main.go:40:2"],
    )?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "#: main.go:6:8\n\
         msgid \"one\"\n\
         msgstr \"\"\n\
         \n\
         #: main.go:7:8\n\
         msgid \"two three\"\n\
         msgstr \"\"\n\
         \n\
         #: main.go:9:8\n\
         msgid \"01 multi\\n02 line\"\n\
         msgstr \"\"\n\
         \n"
    );
    assert_eq!(
        output.stderr,
        "WARNING: argument not a string literal (identifier)\n\
         main.go:8:9:\n\
         \ti18n.G(hello)\n\
         \t       ^\n"
    );

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_callers("callers.json", &["main.go:7:8", "main.go:6:8"])?;

    let first = run(&mut test.extract_command())?;
    let second = run(&mut test.extract_command())?;
    assert_eq!(first.stdout, second.stdout);
    assert!(!first.stdout.is_empty());

    Ok(())
}

#[test]
fn test_sorted_output() -> Result<()> {
    let test = CliTest::with_file(
        "b/b.go",
        "package b\n\nfunc f() {\n\tG(\"zebra\")\n\tG(\"apple\")\n}\n",
    )?;
    test.write_file("a/a.go", "package a\n\nfunc f() {\n\tG(\"mango\")\n}\n")?;
    test.write_callers("callers.json", &["b/b.go:4:3", "b/b.go:5:3", "a/a.go:4:3"])?;

    let output = run(test.extract_command().arg("--sort"))?;
    let msgids: Vec<&str> = output
        .stdout
        .lines()
        .filter(|line| line.starts_with("msgid "))
        .collect();
    assert_eq!(
        msgids,
        vec![
            "msgid \"apple\"",
            "msgid \"mango\"",
            "msgid \"zebra\""
        ]
    );

    let output = run(&mut test.extract_command())?;
    let msgids: Vec<&str> = output
        .stdout
        .lines()
        .filter(|line| line.starts_with("msgid "))
        .collect();
    assert_eq!(
        msgids,
        vec![
            "msgid \"mango\"",
            "msgid \"zebra\"",
            "msgid \"apple\""
        ]
    );

    Ok(())
}

const COMMENTED_GO: &str = "package main

func main() {
\t// TRANSLATORS: title of the settings page
\t// shown in the menu too
\tG(\"Settings\")
\t// GURUTEXT_IGNORE: debug only
\tG(\"Debug\")
\t// Plain comment
\tG(\"Plain\")
}
";

#[test]
fn test_translator_comments() -> Result<()> {
    let test = CliTest::with_file("main.go", COMMENTED_GO)?;
    test.write_callers("callers.json", &["main.go:6:3", "main.go:8:3", "main.go:10:3"])?;

    let output = run(test.extract_command().args(["--comment", "TRANSLATORS:"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "#. TRANSLATORS: title of the settings page\n\
         #. shown in the menu too\n\
         #: main.go:6:3\n\
         msgid \"Settings\"\n\
         msgstr \"\"\n\
         \n\
         #: main.go:10:3\n\
         msgid \"Plain\"\n\
         msgstr \"\"\n\
         \n"
    );
    assert_eq!(
        output.stderr,
        "NOTE: call ignored, preceding comment contains GURUTEXT_IGNORE\n\
         main.go:8:4:\n"
    );

    Ok(())
}

#[test]
fn test_custom_ignore_marker() -> Result<()> {
    let test = CliTest::with_file("main.go", COMMENTED_GO)?;
    test.write_callers("callers.json", &["main.go:8:3", "main.go:10:3"])?;

    let output = run(test.extract_command().args([
        "--comment",
        "TRANSLATORS:",
        "--ignore",
        "Plain comment",
    ]))?;

    let msgids: Vec<&str> = output
        .stdout
        .lines()
        .filter(|line| line.starts_with("msgid "))
        .collect();
    assert_eq!(msgids, vec!["msgid \"Debug\""]);
    assert!(output.stderr.contains("main.go:10:4:"));

    Ok(())
}

#[test]
fn test_without_comment_prefix_nothing_is_ignored() -> Result<()> {
    let test = CliTest::with_file("main.go", COMMENTED_GO)?;
    test.write_callers("callers.json", &["main.go:8:3"])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.stdout, "#: main.go:8:3\nmsgid \"Debug\"\nmsgstr \"\"\n\n");
    assert_eq!(output.stderr, "");

    Ok(())
}

#[test]
fn test_exclude_files() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_file("main_test.go", "package main\n\nfunc T() {\n\tG(\"test only\")\n}\n")?;
    test.write_callers("callers.json", &["main.go:6:8", "main_test.go:4:3"])?;

    let output = run(test.extract_command().args(["--exclude", "_test\\.go$"]))?;

    assert_eq!(output.stdout, "#: main.go:6:8\nmsgid \"one\"\nmsgstr \"\"\n\n");

    Ok(())
}

#[test]
fn test_absolute_positions() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    let path = test.root().join("main.go");
    let position = format!("{}:6:8", path.display());
    test.write_callers("callers.json", &[&position])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(
        output.stdout,
        format!("#: {}\nmsgid \"one\"\nmsgstr \"\"\n\n", position)
    );

    Ok(())
}

#[test]
fn test_callers_from_stdin() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;

    let mut child = test
        .command()
        .args(["--callers", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(br#"[{"pos": "main.go:6:8"}]"#)?;
    }
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "#: main.go:6:8\nmsgid \"one\"\nmsgstr \"\"\n\n"
    );

    Ok(())
}

#[test]
fn test_invalid_position_is_fatal() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_callers("callers.json", &["main.go:6:8", "main.go:6"])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout, "");
    assert_eq!(
        output.stderr,
        "Error: pos not in /path/to/file.go:line:column format: main.go:6\n"
    );

    Ok(())
}

#[test]
fn test_syntax_error_is_fatal() -> Result<()> {
    let test = CliTest::with_file("main.go", MAIN_GO)?;
    test.write_file("broken.go", "package main\n\nfunc main() {\n\tG(\"x\"\n}\n")?;
    test.write_callers("callers.json", &["main.go:6:8", "broken.go:4:3"])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout, "");
    assert!(output.stderr.starts_with("Error: broken.go:"));
    assert!(output.stderr.ends_with(": syntax error\n"));

    Ok(())
}

#[test]
fn test_mixed_concatenation_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "main.go",
        "package main\n\nfunc main() {\n\tG(\"hello \" + name)\n}\n",
    )?;
    test.write_callers("callers.json", &["main.go:4:3"])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout, "");
    assert_eq!(
        output.stderr,
        "Error: main.go:4:15: unhandled expression type identifier\n"
    );

    Ok(())
}

#[test]
fn test_missing_source_file_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_callers("callers.json", &["missing.go:4:3"])?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.starts_with("Error: missing.go: "));

    Ok(())
}

#[test]
fn test_no_input_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(&mut test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage: gurutext"));
    assert!(output.stdout.contains("--callers <FILE>"));

    Ok(())
}
