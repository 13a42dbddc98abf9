//! Tests for pipeline module - the StatsTab plan over a realistic monolith.

use omni_splice::plans::stats_tab::{IMPORT_DECLARATION, MARKER};
use omni_splice::plans::stats_tab_plan;
use omni_splice::{Outcome, SourceBuffer, Stage, run_integration};

const MONOLITH: &str = include_str!("fixtures/main.js");

#[test]
fn test_stats_tab_plan_on_monolith() {
    let plan = stats_tab_plan().expect("Build plan");
    let (out, entries, marker) = run_integration(SourceBuffer::new(MONOLITH), &plan);
    let text = out.as_str();

    // Import lands right after the anchor.
    assert!(text.contains(&format!(
        "import * as BtsnoopTab from './ui/tabs/BtsnoopTab.js';\n{IMPORT_DECLARATION}\n"
    )));

    // Call sites now go through the module, with the extra arguments.
    assert_eq!(text.matches("StatsTab.renderStats(finalStats);").count(), 2);
    assert!(text.contains(
        "StatsTab.processForDashboardStats(originalLogLines, consolidatedBatteryDataPoints);"
    ));
    assert!(text.contains(
        "if (cpuLoadPlotContainer) StatsTab.renderCpuPlot(dashboardStats.cpuDataPoints, cpuLoadPlotContainer);"
    ));
    assert!(text.contains(
        "() => StatsTab.renderAppVersions(allAppVersions, appVersionsTable, appSearchInput)"
    ));

    // Local definitions are gone; unrelated code survives.
    assert!(!text.contains("function renderStats"));
    assert!(!text.contains("function renderCpuPlot"));
    assert!(!text.contains("levelBars.innerHTML"));
    assert!(text.contains("async function processForBle() {"));
    assert!(text.contains("async function restoreSession(finalStats) {"));
    assert!(text.ends_with("});\n"));

    // 7 declared, 5 present: five removals, one marker.
    let excisions: Vec<_> = entries
        .iter()
        .filter(|e| e.stage == Stage::Excision)
        .collect();
    assert_eq!(excisions.len(), 7);
    assert_eq!(excisions.iter().filter(|e| e.outcome.is_applied()).count(), 5);
    assert_eq!(text.matches(MARKER).count(), 1);
    assert!(marker);
}

#[test]
fn test_every_rule_reported() {
    let plan = stats_tab_plan().expect("Build plan");
    let (_, entries, _) = run_integration(SourceBuffer::new(MONOLITH), &plan);

    let call_sites: Vec<_> = entries
        .iter()
        .filter(|e| e.stage == Stage::CallSite)
        .collect();
    assert_eq!(call_sites.len(), plan.rules.len());

    let missing: Vec<_> = call_sites
        .iter()
        .filter(|e| e.is_warning())
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(
        missing,
        vec![
            "renderStats(logStats);",
            "if (temperatureStats) renderTemperaturePlot(dashboardStats.temperatureDataPoints);",
            "if (batteryStats) renderBatteryPlot(dashboardStats.batteryDataPoints);",
            "renderBatteryPlot(dashboardStats.batteryDataPoints);",
            "renderBatteryPlot(consolidatedBatteryDataPoints);",
        ]
    );
}

#[test]
fn test_second_run_changes_nothing() {
    let plan = stats_tab_plan().expect("Build plan");
    let (once, _, _) = run_integration(SourceBuffer::new(MONOLITH), &plan);
    let (twice, entries, marker) = run_integration(once.clone(), &plan);

    assert_eq!(twice, once);
    assert_eq!(entries[0].outcome, Outcome::AlreadyPresent);
    assert!(!entries.iter().any(|e| e.outcome.is_applied()));
    assert!(!marker);
}

#[test]
fn test_single_line_definition() {
    let plan = stats_tab_plan().expect("Build plan");
    let buffer = SourceBuffer::new(
        "import * as BtsnoopTab from './ui/tabs/BtsnoopTab.js';\n\
         function renderStats(stats) { return 1; }\n\
         renderStats(logStats);\n",
    );
    let (out, _, _) = run_integration(buffer, &plan);
    let text = out.as_str();

    assert!(text.contains("StatsTab.renderStats(logStats);"));
    assert!(!text.contains("function renderStats"));
    assert_eq!(text.matches(MARKER).count(), 1);
}

#[test]
fn test_missing_anchor_leaves_imports() {
    let plan = stats_tab_plan().expect("Build plan");
    let buffer = SourceBuffer::new("import * as Other from './other.js';\nrenderStats(logStats);\n");
    let (out, entries, _) = run_integration(buffer, &plan);

    assert!(!out.as_str().contains(IMPORT_DECLARATION));
    assert!(out.as_str().starts_with("import * as Other from './other.js';\nStatsTab."));
    assert_eq!(entries[0].stage, Stage::Import);
    assert_eq!(entries[0].outcome, Outcome::NotFound);
}

#[test]
fn test_crlf_monolith_stays_crlf() {
    let plan = stats_tab_plan().expect("Build plan");
    let buffer = SourceBuffer::new(
        "import * as BtsnoopTab from './ui/tabs/BtsnoopTab.js';\r\nconst x = 1;\r\n",
    );
    let (out, _, _) = run_integration(buffer, &plan);

    assert_eq!(
        out.as_str(),
        format!(
            "import * as BtsnoopTab from './ui/tabs/BtsnoopTab.js';\r\n{IMPORT_DECLARATION}\r\nconst x = 1;\r\n"
        )
    );
}
