#![forbid(unsafe_code)]

//! Group parsed records by benchmark, rank frameworks and compute relative percentages.

use crate::error::{Error, Result};
use crate::types::{Direction, LogRecord, Metric, Tool};
use serde::Serialize;
use std::collections::BTreeMap;

/// One framework's position inside a benchmark group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
	/// Framework name.
	pub framework: String,
	/// Value of the ranking metric.
	pub value: f64,
	/// `value / max(value in group) * 100`; the group maximum is exactly 100.
	pub percentage: f64,
	/// All metrics of the underlying record, for multi-panel charts.
	pub metrics: BTreeMap<Metric, f64>,
}

/// Benchmark name → frameworks ranked best-first by `metric`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
	/// Tool the records came from.
	pub tool: Tool,
	/// Ranking metric.
	pub metric: Metric,
	/// Groups in sorted benchmark order.
	pub groups: BTreeMap<String, Vec<Ranked>>,
}

/// Rank `records` of `tool` by `metric` within each benchmark.
///
/// Higher-is-better metrics sort descending, lower-is-better ascending; ties keep
/// scan order. Records without the metric are ignored. No usable record at all
/// is [`Error::EmptyResult`].
pub fn aggregate(tool: Tool, records: &[LogRecord], metric: Metric) -> Result<MetricTable> {
	let mut groups: BTreeMap<String, Vec<Ranked>> = BTreeMap::new();
	for rec in records.iter().filter(|r| r.tool == tool) {
		let Some(value) = rec.metric(metric) else { continue };
		groups.entry(rec.benchmark.clone()).or_default().push(Ranked {
			framework: rec.framework.clone(),
			value,
			percentage: 0.0,
			metrics: rec.metrics.clone(),
		});
	}
	if groups.is_empty() {
		return Err(Error::EmptyResult(tool));
	}
	for group in groups.values_mut() {
		rank(group, metric.direction());
	}
	Ok(MetricTable { tool, metric, groups })
}

fn rank(group: &mut [Ranked], direction: Direction) {
	match direction {
		Direction::HigherIsBetter => group.sort_by(|a, b| b.value.total_cmp(&a.value)),
		Direction::LowerIsBetter => group.sort_by(|a, b| a.value.total_cmp(&b.value)),
	}
	let max = group.iter().map(|r| r.value).fold(f64::NEG_INFINITY, f64::max);
	for r in group.iter_mut() {
		r.percentage = percentage_of(r.value, max);
	}
}

/// Percentage of `max`, pinned to 100 when `value == max` (covers a zero maximum).
pub fn percentage_of(value: f64, max: f64) -> f64 {
	if value == max { 100.0 } else { value / max * 100.0 }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rec(tool: Tool, fw: &str, bench: &str, metrics: &[(Metric, f64)]) -> LogRecord {
		LogRecord {
			tool,
			framework: fw.into(),
			benchmark: bench.into(),
			command: None,
			metrics: metrics.iter().copied().collect(),
			histogram: Vec::new(),
		}
	}

	#[test]
	fn throughput_sorts_descending_with_percentages() {
		let recs = vec![
			rec(Tool::FinishSummary, "Laravel", "Api", &[(Metric::RequestsPerSec, 500.0)]),
			rec(Tool::FinishSummary, "Plainphp", "Api", &[(Metric::RequestsPerSec, 2000.0)]),
			rec(Tool::FinishSummary, "Symfony", "Api", &[(Metric::RequestsPerSec, 1000.0)]),
			rec(Tool::FinishSummary, "Laravel", "Films", &[(Metric::RequestsPerSec, 10.0)]),
		];
		let t = aggregate(Tool::FinishSummary, &recs, Metric::RequestsPerSec).unwrap();
		let api = &t.groups["Api"];
		let names: Vec<&str> = api.iter().map(|r| r.framework.as_str()).collect();
		assert_eq!(names, ["Plainphp", "Symfony", "Laravel"]);
		let pct: Vec<f64> = api.iter().map(|r| r.percentage).collect();
		assert_eq!(pct, [100.0, 50.0, 25.0]);
		assert_eq!(t.groups.keys().map(String::as_str).collect::<Vec<_>>(), ["Api", "Films"]);
		assert_eq!(t.groups["Films"][0].percentage, 100.0);
	}

	#[test]
	fn latency_sorts_ascending() {
		let recs = vec![
			rec(Tool::FixedDuration, "A", "Api", &[(Metric::AvgLatencyMs, 30.0), (Metric::AvgReqPerSec, 1.0)]),
			rec(Tool::FixedDuration, "B", "Api", &[(Metric::AvgLatencyMs, 10.0), (Metric::AvgReqPerSec, 3.0)]),
		];
		let t = aggregate(Tool::FixedDuration, &recs, Metric::AvgLatencyMs).unwrap();
		let api = &t.groups["Api"];
		assert_eq!(api[0].framework, "B");
		assert_eq!(api[0].metrics[&Metric::AvgReqPerSec], 3.0);
		assert_eq!(api[1].percentage, 100.0);
	}

	#[test]
	fn ties_keep_scan_order() {
		let recs = vec![
			rec(Tool::FinishSummary, "First", "Api", &[(Metric::RequestsPerSec, 7.0)]),
			rec(Tool::FinishSummary, "Second", "Api", &[(Metric::RequestsPerSec, 7.0)]),
			rec(Tool::FinishSummary, "Third", "Api", &[(Metric::RequestsPerSec, 7.0)]),
		];
		let t = aggregate(Tool::FinishSummary, &recs, Metric::RequestsPerSec).unwrap();
		let names: Vec<&str> = t.groups["Api"].iter().map(|r| r.framework.as_str()).collect();
		assert_eq!(names, ["First", "Second", "Third"]);
	}

	#[test]
	fn all_zero_group_is_pinned() {
		let recs = vec![
			rec(Tool::FinishSummary, "A", "Api", &[(Metric::RequestsPerSec, 0.0)]),
			rec(Tool::FinishSummary, "B", "Api", &[(Metric::RequestsPerSec, 0.0)]),
		];
		let t = aggregate(Tool::FinishSummary, &recs, Metric::RequestsPerSec).unwrap();
		assert!(t.groups["Api"].iter().all(|r| r.percentage == 100.0));
	}

	#[test]
	fn empty_input_is_empty_result() {
		assert!(matches!(aggregate(Tool::StructuredMetrics, &[], Metric::RequestRate), Err(Error::EmptyResult(Tool::StructuredMetrics))));
		let other = vec![rec(Tool::FinishSummary, "A", "Api", &[(Metric::RequestsPerSec, 1.0)])];
		assert!(aggregate(Tool::StructuredMetrics, &other, Metric::RequestRate).is_err());
	}
}
