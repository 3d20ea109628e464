//! End-to-end tests for the batch compiler, driving it through the same
//! library entry points the binary uses.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use usercast::batch::{build, BuildError, BuildOptions, AGGREGATE_FILE};
use usercast_core::{ImportantStrategy, PipelineOptions};

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_single_input_build() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "site.css", "a { color: red; }\n");
    let out = dir.path().join("out");

    let outcome = build(&[input], &out, &BuildOptions::default()).unwrap();

    assert_eq!(outcome.written.len(), 1);
    assert!(outcome.failures.is_empty());
    assert_eq!(
        fs::read_to_string(out.join("site.css")).unwrap(),
        "a{color:red !important}"
    );
    assert_eq!(
        fs::read_to_string(out.join(AGGREGATE_FILE)).unwrap(),
        "@import url(\"site.css\");\n"
    );
}

#[test]
fn test_sibling_metadata_is_applied() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "theme.css", "a { color: /*[[accent]]*/; }\n");
    fs::write(
        dir.path().join("theme.meta.json"),
        r##"{
            "preprocessor": "uso",
            "vars": {
                "accent": { "type": "color", "default": "#336699" }
            }
        }"##,
    )
    .unwrap();
    let out = dir.path().join("out");

    build(&[input], &out, &BuildOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(out.join("theme.css")).unwrap(),
        "a{color:#336699 !important}"
    );
}

#[test]
fn test_aggregate_preserves_input_order() {
    let dir = TempDir::new().unwrap();
    let b = write_input(&dir, "b.css", "a{top:0}");
    let a = write_input(&dir, "a.css", "a{left:0}");
    let out = dir.path().join("out");

    build(&[b, a], &out, &BuildOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(out.join(AGGREGATE_FILE)).unwrap(),
        "@import url(\"b.css\");\n@import url(\"a.css\");\n"
    );
}

#[test]
fn test_invalid_input_aborts_without_writing() {
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "good.css", "a{top:0}");
    let bad = write_input(&dir, "bad.css", "a{color:5px}");
    let out = dir.path().join("out");

    let error = build(&[good, bad], &out, &BuildOptions::default()).unwrap_err();

    assert!(matches!(error, BuildError::Pipeline { .. }));
    assert!(!out.exists());
}

#[test]
fn test_keep_going_records_failures_and_writes_the_rest() {
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "good.css", "a{top:0}");
    let bad = write_input(&dir, "bad.css", "a{color:5px}");
    let out = dir.path().join("out");

    let options = BuildOptions {
        keep_going: true,
        ..Default::default()
    };
    let outcome = build(&[good, bad], &out, &options).unwrap();

    assert_eq!(outcome.written.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(out.join("good.css").exists());
    assert!(!out.join("bad.css").exists());
    assert_eq!(
        fs::read_to_string(out.join(AGGREGATE_FILE)).unwrap(),
        "@import url(\"good.css\");\n"
    );
}

#[test]
fn test_missing_input_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let missing = dir.path().join("nope.css");

    let error = build(&[missing], &out, &BuildOptions::default()).unwrap_err();
    assert!(matches!(error, BuildError::Read { .. }));
}

#[test]
fn test_textual_strategy_selectable() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "site.css", "a {\n  color: red;\n}\n");
    let out = dir.path().join("out");

    let options = BuildOptions {
        pipeline: PipelineOptions {
            strategy: ImportantStrategy::Textual,
        },
        ..Default::default()
    };
    build(&[input], &out, &options).unwrap();

    let css = fs::read_to_string(out.join("site.css")).unwrap();
    assert_eq!(css.matches("!important").count(), 1);
}

#[test]
fn test_regexp_repair_warnings_surface() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "site.css",
        "@-moz-document regexp(\"https?://x\\.y/.*\") { a { top: 0; } }\n",
    );
    let out = dir.path().join("out");

    let outcome = build(&[input], &out, &BuildOptions::default()).unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].1.contains("Fixed escaping"));
}
