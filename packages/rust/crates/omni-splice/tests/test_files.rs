//! Tests for file-level operations - single read, single atomic write.

use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

use omni_splice::plans::{battery_regex_patch, stats_tab_plan};
use omni_splice::{LinePatch, SpliceConfig, SpliceError, integrate_file, patch_file_line};

const MONOLITH: &str = include_str!("fixtures/main.js");

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    File::create(&path)
        .expect("Create file")
        .write_all(content.as_bytes())
        .expect("Write content");
    path
}

#[test]
fn test_integrate_file_apply() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_fixture(&dir, "main.js", MONOLITH);
    let plan = stats_tab_plan().expect("Build plan");

    let report = integrate_file(&path, &plan, SpliceConfig::default()).expect("Should integrate");

    assert!(report.written);
    assert!(report.changed());
    assert!(report.has_warnings());
    let on_disk = std::fs::read_to_string(&path).expect("Read file");
    assert_eq!(on_disk, report.modified);
    assert!(on_disk.contains("import * as StatsTab from './ui/tabs/StatsTab.js';"));
}

#[test]
fn test_integrate_file_dry_run() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_fixture(&dir, "main.js", MONOLITH);
    let plan = stats_tab_plan().expect("Build plan");
    let config = SpliceConfig {
        dry_run: true,
        ..Default::default()
    };

    let report = integrate_file(&path, &plan, config).expect("Should preview");

    assert!(!report.written);
    assert!(report.diff.contains("+import * as StatsTab"));
    assert!(report.diff.contains("-    function renderStats(stats) {"));
    let on_disk = std::fs::read_to_string(&path).expect("Read file");
    assert_eq!(on_disk, MONOLITH); // Original unchanged
}

#[test]
fn test_integrate_missing_file() {
    let dir = TempDir::new().expect("Create temp dir");
    let plan = stats_tab_plan().expect("Build plan");

    let result = integrate_file(dir.path().join("absent.js"), &plan, SpliceConfig::default());

    assert!(matches!(result, Err(SpliceError::Io(_))));
}

#[test]
fn test_report_json() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_fixture(&dir, "main.js", MONOLITH);
    let plan = stats_tab_plan().expect("Build plan");

    let report = integrate_file(&path, &plan, SpliceConfig::default()).expect("Should integrate");
    let json = serde_json::to_value(&report).expect("Serialize report");

    assert_eq!(json["marker_inserted"], true);
    assert_eq!(json["entries"][0]["stage"], "import");
    assert_eq!(json["entries"][0]["outcome"]["status"], "applied");
    assert!(json.get("original").is_none());
}

#[test]
fn test_escape_fix_touches_one_line() {
    let dir = TempDir::new().expect("Create temp dir");
    let content = "const a = 1;\r\nconst re = /level:\\\\\\\\s*(\\\\\\\\d+)/;\nconst b = '\\\\\\\\s*';\n";
    let path = write_fixture(&dir, "main.js", content);

    let report = patch_file_line(&path, &battery_regex_patch(2), SpliceConfig::default())
        .expect("Should patch");

    assert!(report.written);
    let on_disk = std::fs::read_to_string(&path).expect("Read file");
    assert_eq!(
        on_disk,
        "const a = 1;\r\nconst re = /level:\\\\s*(\\\\d+)/;\nconst b = '\\\\\\\\s*';\n"
    );
}

#[test]
fn test_line_patch_out_of_range_writes_nothing() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_fixture(&dir, "main.js", "one\ntwo\n");

    let result = patch_file_line(&path, &LinePatch::new(1557), SpliceConfig::default());

    assert!(matches!(
        result,
        Err(SpliceError::LineOutOfRange { line: 1557, lines: 2 })
    ));
    assert_eq!(std::fs::read_to_string(&path).expect("Read file"), "one\ntwo\n");
}
