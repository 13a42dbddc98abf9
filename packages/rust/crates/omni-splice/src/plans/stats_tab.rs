//! StatsTab integration plan.
//!
//! Moves the statistics rendering helpers out of `main.js` into
//! `ui/tabs/StatsTab.js`. The new module's functions take the DOM containers
//! and the aggregate inputs as parameters, so several calls gain arguments.

use crate::error::SpliceError;
use crate::excise::{DefinitionTarget, ExcisionPlan, MarkerPolicy};
use crate::import::ImportInjection;
use crate::pipeline::IntegrationPlan;
use crate::rewrite::SubstitutionRule;

/// Existing import the new one is placed after.
pub const IMPORT_ANCHOR: &str = "import * as BtsnoopTab from './ui/tabs/BtsnoopTab.js';";

/// Import of the extracted module.
pub const IMPORT_DECLARATION: &str = "import * as StatsTab from './ui/tabs/StatsTab.js';";

/// Comment left where the first removed definition was.
pub const MARKER: &str = "// Stats rendering functions moved to StatsTab.js module";

/// Definitions superseded by StatsTab exports: `(name, parameter list)`.
pub const MOVED_DEFINITIONS: &[(&str, &str)] = &[
    ("renderStats", "stats"),
    ("processForDashboardStats", ""),
    ("renderDashboardStats", "stats"),
    ("renderAppVersions", "versions"),
    ("renderCpuPlot", "dataPoints"),
    ("renderTemperaturePlot", "dataPoints"),
    ("renderBatteryPlot", "dataPoints"),
];

/// Call-site rules in application order.
///
/// Guarded forms (`if (...) call(...)`, arrow callbacks) come before the bare
/// call they contain; otherwise the bare rule would rewrite them first and the
/// guarded rule would report not-found. Every rule rewrites all occurrences.
#[must_use]
pub fn call_site_rules() -> Vec<SubstitutionRule> {
    [
        ("renderStats(logStats);", "StatsTab.renderStats(logStats);"),
        ("renderStats(finalStats);", "StatsTab.renderStats(finalStats);"),
        (
            "const dashboardStats = processForDashboardStats();",
            "const dashboardStats = StatsTab.processForDashboardStats(originalLogLines, consolidatedBatteryDataPoints);",
        ),
        (
            "renderDashboardStats(dashboardStats);",
            "StatsTab.renderDashboardStats(dashboardStats, { cpuLoadStats, temperatureStats, batteryStats });",
        ),
        (
            "if (cpuLoadPlotContainer) renderCpuPlot(dashboardStats.cpuDataPoints);",
            "if (cpuLoadPlotContainer) StatsTab.renderCpuPlot(dashboardStats.cpuDataPoints, cpuLoadPlotContainer);",
        ),
        (
            "renderCpuPlot(dashboardStats.cpuDataPoints);",
            "StatsTab.renderCpuPlot(dashboardStats.cpuDataPoints, cpuLoadPlotContainer);",
        ),
        (
            "if (temperatureStats) renderTemperaturePlot(dashboardStats.temperatureDataPoints);",
            "if (temperatureStats) StatsTab.renderTemperaturePlot(dashboardStats.temperatureDataPoints, document.getElementById('temperaturePlotContainer'));",
        ),
        (
            "renderTemperaturePlot(dashboardStats.temperatureDataPoints);",
            "StatsTab.renderTemperaturePlot(dashboardStats.temperatureDataPoints, document.getElementById('temperaturePlotContainer'));",
        ),
        (
            "if (batteryStats) renderBatteryPlot(dashboardStats.batteryDataPoints);",
            "if (batteryStats) StatsTab.renderBatteryPlot(consolidatedBatteryDataPoints, batteryPlotContainer);",
        ),
        (
            "renderBatteryPlot(dashboardStats.batteryDataPoints);",
            "StatsTab.renderBatteryPlot(consolidatedBatteryDataPoints, batteryPlotContainer);",
        ),
        (
            "renderBatteryPlot(consolidatedBatteryDataPoints);",
            "StatsTab.renderBatteryPlot(consolidatedBatteryDataPoints, batteryPlotContainer);",
        ),
        (
            "() => renderAppVersions(allAppVersions)",
            "() => StatsTab.renderAppVersions(allAppVersions, appVersionsTable, appSearchInput)",
        ),
        (
            "renderAppVersions(allAppVersions);",
            "StatsTab.renderAppVersions(allAppVersions, appVersionsTable, appSearchInput);",
        ),
    ]
    .into_iter()
    .map(|(from, to)| SubstitutionRule::literal(from, to).all())
    .collect()
}

/// The full StatsTab plan.
///
/// # Errors
/// Returns `SpliceError::Pattern` if a definition header fails to compile.
pub fn stats_tab_plan() -> Result<IntegrationPlan, SpliceError> {
    let targets = MOVED_DEFINITIONS
        .iter()
        .map(|(name, params)| DefinitionTarget::function(name, params))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IntegrationPlan {
        imports: vec![ImportInjection::new(IMPORT_ANCHOR, IMPORT_DECLARATION)],
        rules: call_site_rules(),
        excision: ExcisionPlan {
            targets,
            marker: MARKER.to_string(),
            policy: MarkerPolicy::FirstRemoval,
        },
    })
}
