#![forbid(unsafe_code)]

use comfy_table::{Cell, Table};
use fwbench_core::aggregate::aggregate;
use fwbench_core::scan::ScanReport;
use fwbench_core::{MetricTable, Result, Tool};
use serde_json::json;

/// Aggregated view of one tool, ready for table or JSON output.
pub enum ToolSummary {
	Ranked(MetricTable),
	Histograms(Vec<HistogramRow>),
}

pub struct HistogramRow {
	pub benchmark: String,
	pub framework: String,
	pub samples: usize,
	/// Latency at the highest kept percentile.
	pub tail_latency_ms: f64,
	pub tail_percentile: f64,
}

pub fn summarize(report: &ScanReport) -> Result<ToolSummary> {
	match report.tool.primary_metric() {
		Some(metric) => Ok(ToolSummary::Ranked(aggregate(report.tool, &report.records, metric)?)),
		None => {
			let mut rows: Vec<HistogramRow> = report
				.records
				.iter()
				.filter_map(|r| {
					let tail = r.histogram.iter().max_by(|a, b| a.percentile.total_cmp(&b.percentile))?;
					Some(HistogramRow {
						benchmark: r.benchmark.clone(),
						framework: r.framework.clone(),
						samples: r.histogram.len(),
						tail_latency_ms: tail.latency_ms,
						tail_percentile: tail.percentile,
					})
				})
				.collect();
			if rows.is_empty() {
				return Err(fwbench_core::Error::EmptyResult(report.tool));
			}
			rows.sort_by(|a, b| a.benchmark.cmp(&b.benchmark));
			Ok(ToolSummary::Histograms(rows))
		}
	}
}

pub fn print_table(tool: Tool, summary: &ToolSummary) {
	match summary {
		ToolSummary::Ranked(table) => {
			for (bench, group) in &table.groups {
				println!("{tool} / {bench}");
				let mut t = Table::new();
				t.set_header(vec!["#", "Framework", table.metric.label(), "%"]);
				for (i, r) in group.iter().enumerate() {
					t.add_row(vec![
						Cell::new(i + 1),
						Cell::new(&r.framework),
						Cell::new(format!("{:.2}", r.value)),
						Cell::new(format!("{:.2}%", r.percentage)),
					]);
				}
				println!("{t}");
			}
		}
		ToolSummary::Histograms(rows) => {
			println!("{tool}");
			let mut t = Table::new();
			t.set_header(vec!["Benchmark", "Framework", "Samples", "Tail percentile", "Tail latency (ms)"]);
			for r in rows {
				t.add_row(vec![
					Cell::new(&r.benchmark),
					Cell::new(&r.framework),
					Cell::new(r.samples),
					Cell::new(format!("{:.6}", r.tail_percentile)),
					Cell::new(format!("{:.3}", r.tail_latency_ms)),
				]);
			}
			println!("{t}");
		}
	}
}

pub fn to_json(summary: &ToolSummary) -> serde_json::Result<serde_json::Value> {
	match summary {
		ToolSummary::Ranked(table) => serde_json::to_value(table),
		ToolSummary::Histograms(rows) => Ok(serde_json::Value::Array(
			rows.iter()
				.map(|r| {
					json!({
						"benchmark": r.benchmark,
						"framework": r.framework,
						"samples": r.samples,
						"tail_percentile": r.tail_percentile,
						"tail_latency_ms": r.tail_latency_ms,
					})
				})
				.collect(),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use fwbench_core::{LatencyPoint, LogRecord, Metric};

	fn report(tool: Tool, records: Vec<LogRecord>) -> ScanReport { ScanReport { tool, records, skipped: Vec::new() } }

	fn rec(tool: Tool, fw: &str) -> LogRecord {
		LogRecord {
			tool,
			framework: fw.into(),
			benchmark: "Api".into(),
			command: None,
			metrics: Default::default(),
			histogram: Vec::new(),
		}
	}

	#[test]
	fn ranked_json_keeps_groups_and_percentages() {
		let mut slow = rec(Tool::FinishSummary, "Laravel");
		slow.metrics.insert(Metric::RequestsPerSec, 50.0);
		let mut fast = rec(Tool::FinishSummary, "Octane");
		fast.metrics.insert(Metric::RequestsPerSec, 200.0);
		let summary = summarize(&report(Tool::FinishSummary, vec![slow, fast])).unwrap();
		let v = to_json(&summary).unwrap();
		assert_eq!(v["metric"], "requests_per_sec");
		assert_eq!(v["groups"]["Api"][0]["framework"], "Octane");
		assert_eq!(v["groups"]["Api"][1]["percentage"], 25.0);
	}

	#[test]
	fn histogram_json_reports_tail_point() {
		let mut r = rec(Tool::LatencyHistogram, "Symfony");
		r.histogram = vec![
			LatencyPoint { percentile: 0.5, latency_ms: 1.0 },
			LatencyPoint { percentile: 0.99, latency_ms: 8.0 },
		];
		let summary = summarize(&report(Tool::LatencyHistogram, vec![r])).unwrap();
		let v = to_json(&summary).unwrap();
		assert_eq!(v[0]["samples"], 2);
		assert_eq!(v[0]["tail_latency_ms"], 8.0);
	}

	#[test]
	fn histograms_without_points_are_empty() {
		let summary = summarize(&report(Tool::LatencyHistogram, vec![rec(Tool::LatencyHistogram, "Symfony")]));
		assert!(matches!(summary, Err(fwbench_core::Error::EmptyResult(Tool::LatencyHistogram))));
	}
}
