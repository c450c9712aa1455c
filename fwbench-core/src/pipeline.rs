#![forbid(unsafe_code)]

//! scan → charts → files, one tool at a time.

use crate::chart::build_charts;
use crate::config::Config;
use crate::error::Result;
use crate::export::{export_chart, ChartRenderer};
use crate::scan::{scan_tool, ScanReport};
use crate::types::Tool;
use std::path::PathBuf;

/// Scan, aggregate and export every chart for `tool`.
///
/// Returns the written paths in export order. `Error::EmptyResult` means the
/// tool had no usable logs and nothing was written.
pub fn render_tool(cfg: &Config, tool: Tool, renderer: &dyn ChartRenderer) -> Result<Vec<PathBuf>> {
	let report = scan_tool(&cfg.results_dir, tool)?;
	export_report(cfg, &report, renderer)
}

/// Build and write the charts for an existing scan.
pub fn export_report(cfg: &Config, report: &ScanReport, renderer: &dyn ChartRenderer) -> Result<Vec<PathBuf>> {
	let charts = build_charts(report.tool, &report.records, &cfg.outputs)?;
	charts.iter().map(|c| export_chart(c, &cfg.output_dir, renderer)).collect()
}
