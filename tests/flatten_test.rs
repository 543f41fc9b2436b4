//! Integration tests for flattening a component file.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vue_style_flatten::{
    flatten_document, flatten_file, locate_style_block, Outcome, RuleSet, STYLE_CLOSE,
};

const FIXTURE: &str = include_str!("fixtures/settings.vue");

fn write_fixture(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("index.vue");
    fs::write(&path, contents).unwrap();
    path
}

fn style_block(doc: &str) -> &str {
    &doc[locate_style_block(doc).unwrap()]
}

#[test]
fn test_fixture_is_fully_flattened() {
    let rules = RuleSet::compile().unwrap();
    let (out, report) = flatten_document(FIXTURE, &rules).unwrap();
    let block = style_block(&out);

    assert!(!block.contains('&'));
    assert_eq!(block.matches('{').count(), block.matches('}').count());
    assert!(report.skipped.is_empty(), "skipped: {:?}", report.skipped);
    assert_eq!(report.regex_replacements + report.literal_replacements, 12);
}

#[test]
fn test_fixture_selectors() {
    let rules = RuleSet::compile().unwrap();
    let (out, _) = flatten_document(FIXTURE, &rules).unwrap();

    for selector in [
        ".section-badge.active {",
        ".section-badge.inactive {",
        ".form-item:last-child {",
        ".form-input:focus {",
        ".section-actions button.test-btn {",
        ".section-actions button.backup-btn {",
        ".section-actions button.save-btn.primary {",
        ".section-actions button:disabled {",
        ".template-item:last-child {",
        ".info-item:last-child {",
        ".template-editor button.cancel-btn {",
        ".template-editor button.save-btn.primary {",
    ] {
        assert_eq!(out.matches(selector).count(), 1, "{}", selector);
    }

    assert!(out.contains(
        ".section-badge.active {\n    background: #e6f7ee;\n  }\n\n.section-badge.inactive {\n    background: #fdecea;\n  }\n\n.form-item {"
    ));
    assert!(out.contains(
        ".section-actions {\n  display: flex;\n  gap: 8px;\n  button {\n    padding: 8px 16px;\n  }\n}\n\n.section-actions button.test-btn {"
    ));
    assert!(out.ends_with(
        ".template-editor button.save-btn.primary {\n      background: #409eff;\n    }\n</style>\n"
    ));
}

#[test]
fn test_content_outside_block_unchanged() {
    let rules = RuleSet::compile().unwrap();
    let (out, _) = flatten_document(FIXTURE, &rules).unwrap();

    let before = locate_style_block(FIXTURE).unwrap();
    let after = locate_style_block(&out).unwrap();
    assert_eq!(&out[..after.start], &FIXTURE[..before.start]);
    assert_eq!(&out[after.end..], &FIXTURE[before.end..]);
    assert!(out.contains("@click=\"a && b\""));
}

#[test]
fn test_second_run_is_noop() {
    let rules = RuleSet::compile().unwrap();
    let (once, _) = flatten_document(FIXTURE, &rules).unwrap();
    let (twice, report) = flatten_document(&once, &rules).unwrap();

    assert_eq!(once, twice);
    assert_eq!(report.regex_replacements, 0);
    assert_eq!(report.literal_replacements, 0);
    assert_eq!(report.triples_collapsed, 0);
    assert_eq!(report.stray_braces_dropped, 0);
}

#[test]
fn test_flatten_file_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, FIXTURE);

    let outcome = flatten_file(&path, None).unwrap();
    assert!(matches!(outcome, Outcome::Flattened(_)));

    let written = fs::read_to_string(&path).unwrap();
    assert!(!style_block(&written).contains('&'));
}

#[test]
fn test_flatten_file_to_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, FIXTURE);
    let output = dir.path().join("flat.vue");

    flatten_file(&input, Some(output.as_path())).unwrap();

    assert_eq!(fs::read_to_string(&input).unwrap(), FIXTURE);
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains(".info-item:last-child {"));
}

#[test]
fn test_missing_open_marker_leaves_file() {
    let dir = TempDir::new().unwrap();
    let src = "<template></template>\n<style>\n.a {\n  &.active {}\n}\n</style>\n";
    let path = write_fixture(&dir, src);

    let outcome = flatten_file(&path, None).unwrap();
    assert_eq!(outcome, Outcome::StyleSectionNotFound);
    assert_eq!(outcome.message(), "Could not find style section!");
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
}

#[test]
fn test_missing_close_marker_leaves_file() {
    let dir = TempDir::new().unwrap();
    let src = FIXTURE.replace(STYLE_CLOSE, "");
    let path = write_fixture(&dir, &src);

    let outcome = flatten_file(&path, None).unwrap();
    assert_eq!(outcome, Outcome::StyleSectionNotFound);
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
}

#[test]
fn test_unnested_css_written_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let src = "<template></template>\n<style lang=\"css\" scoped>\n.quote::after {\n  content: \"}\";\n}\n/* } */\n</style>\n";
    let path = write_fixture(&dir, src);

    let outcome = flatten_file(&path, None).unwrap();
    let Outcome::Flattened(report) = outcome else {
        panic!("style section not found");
    };
    assert_eq!(report.stray_braces_dropped, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = flatten_file(Path::new("/nonexistent/dir/index.vue"), None).unwrap_err();
    assert!(matches!(err, vue_style_flatten::Error::Io(_)));
}
