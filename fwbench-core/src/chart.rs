#![forbid(unsafe_code)]

//! Chart descriptions built from aggregated tables, one builder per tool.
//!
//! A [`Chart`] is renderer-agnostic: titles, output file name and panels of
//! ranked bars or latency series. See [`crate::export`] for turning it into a document.

use crate::aggregate::{aggregate, percentage_of, MetricTable, Ranked};
use crate::config::OutputTemplates;
use crate::error::{Error, Result};
use crate::types::{LatencyPoint, LogRecord, Metric, Tool};
use serde::Serialize;
use std::collections::BTreeMap;

/// One framework's bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
	/// Framework name.
	pub label: String,
	/// Raw metric value.
	pub value: f64,
	/// Relative to the panel maximum, printed as `NN.NN%`.
	pub percentage: f64,
}

/// One framework's latency curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
	/// Framework name.
	pub name: String,
	/// Points in log order.
	pub points: Vec<LatencyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Panel {
	/// Ranked bars for one metric of one benchmark.
	Bars { title: String, metric: Metric, axis: String, bars: Vec<Bar> },
	/// Percentile/latency curves, one per framework.
	Lines { title: String, x_axis: String, y_axis: String, series: Vec<Series> },
}

/// Everything needed to write one chart file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
	/// Tool the chart compares.
	pub tool: Tool,
	/// Page heading.
	pub title: String,
	/// Load generator invocation (first log line), shown under the title.
	pub subtitle: Option<String>,
	/// Output file name, relative to the output directory.
	pub file_name: String,
	/// Panels in display order.
	pub panels: Vec<Panel>,
}

/// Charts for one tool's records. wrk2 yields one chart per benchmark, the others one chart.
pub fn build_charts(tool: Tool, records: &[LogRecord], outputs: &OutputTemplates) -> Result<Vec<Chart>> {
	match tool {
		Tool::FinishSummary => Ok(vec![h2load_chart(records, outputs)?]),
		Tool::FixedDuration => Ok(vec![wrk_chart(records, outputs)?]),
		Tool::LatencyHistogram => wrk2_charts(records, outputs),
		Tool::StructuredMetrics => Ok(vec![k6_chart(records, outputs)?]),
	}
}

fn subtitle(tool: Tool, records: &[LogRecord]) -> Option<String> {
	records
		.iter()
		.filter(|r| r.tool == tool)
		.find_map(|r| r.command.as_deref())
		.map(|cmd| format!("{tool} {cmd}"))
}

/// Bars for `metric`, in the table's ranking order. Percentages are relative to
/// the group maximum of `metric` itself.
fn bars(group: &[Ranked], metric: Metric) -> Vec<Bar> {
	let values: Vec<(String, f64)> = group
		.iter()
		.filter_map(|r| r.metrics.get(&metric).map(|v| (r.framework.clone(), *v)))
		.collect();
	let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
	values.into_iter().map(|(label, value)| Bar { label, value, percentage: percentage_of(value, max) }).collect()
}

fn bar_panels(table: &MetricTable, metrics: &[Metric], title: impl Fn(&str) -> String) -> Vec<Panel> {
	let mut panels = Vec::new();
	for (bench, group) in &table.groups {
		for &metric in metrics {
			panels.push(Panel::Bars { title: title(bench.as_str()), metric, axis: metric.label().to_string(), bars: bars(group, metric) });
		}
	}
	panels
}

/// Requests/sec per benchmark, best first.
pub fn h2load_chart(records: &[LogRecord], outputs: &OutputTemplates) -> Result<Chart> {
	let tool = Tool::FinishSummary;
	let table = aggregate(tool, records, Metric::RequestsPerSec)?;
	Ok(Chart {
		tool,
		title: "Framework requests per second comparison".into(),
		subtitle: subtitle(tool, records),
		file_name: outputs.file_name(tool, None),
		panels: bar_panels(&table, &[Metric::RequestsPerSec], |b| format!("{b} Benchmark")),
	})
}

/// Average latency (ascending) with requests/sec shown in the same framework order.
pub fn wrk_chart(records: &[LogRecord], outputs: &OutputTemplates) -> Result<Chart> {
	let tool = Tool::FixedDuration;
	let table = aggregate(tool, records, Metric::AvgLatencyMs)?;
	Ok(Chart {
		tool,
		title: "Benchmark Results".into(),
		subtitle: subtitle(tool, records),
		file_name: outputs.file_name(tool, None),
		panels: bar_panels(&table, &[Metric::AvgLatencyMs, Metric::AvgReqPerSec], |b| format!("Benchmark: {b}")),
	})
}

/// k6 frameworks ranked by request rate, best first.
pub fn k6_chart(records: &[LogRecord], outputs: &OutputTemplates) -> Result<Chart> {
	let tool = Tool::StructuredMetrics;
	let table = aggregate(tool, records, Metric::RequestRate)?;
	Ok(Chart {
		tool,
		title: "k6 benchmark results".into(),
		subtitle: None,
		file_name: outputs.file_name(tool, None),
		panels: bar_panels(
			&table,
			&[Metric::AvgDurationMs, Metric::RequestRate, Metric::ChecksPassRate, Metric::MaxVus],
			|b| format!("{b} bench"),
		),
	})
}

/// One latency-by-percentile chart per benchmark, one series per framework.
pub fn wrk2_charts(records: &[LogRecord], outputs: &OutputTemplates) -> Result<Vec<Chart>> {
	let tool = Tool::LatencyHistogram;
	let mut by_bench: BTreeMap<&str, Vec<Series>> = BTreeMap::new();
	for rec in records.iter().filter(|r| r.tool == tool && !r.histogram.is_empty()) {
		by_bench
			.entry(rec.benchmark.as_str())
			.or_default()
			.push(Series { name: rec.framework.clone(), points: rec.histogram.clone() });
	}
	if by_bench.is_empty() {
		return Err(Error::EmptyResult(tool));
	}
	let sub = subtitle(tool, records);
	Ok(by_bench
		.into_iter()
		.map(|(bench, series)| Chart {
			tool,
			title: format!("Latency by percentile ({bench} benchmark)"),
			subtitle: sub.clone(),
			file_name: outputs.file_name(tool, Some(bench)),
			panels: vec![Panel::Lines { title: format!("{bench} benchmark"), x_axis: "Percentile".into(), y_axis: "Latency (ms)".into(), series }],
		})
		.collect())
}
