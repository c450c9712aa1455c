#![forbid(unsafe_code)]

//! Domain types shared by the parsers, the aggregator and the chart builders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Load-testing tool that produced a log file. The tag is the `<tool>`
/// segment of `<framework>.<tag>.<benchmark>.<tool>.log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
	/// h2load: one "finished in" summary line.
	#[serde(rename = "h2load")]
	FinishSummary,
	/// wrk2: fixed-rate latency histogram.
	#[serde(rename = "wrk2")]
	LatencyHistogram,
	/// wrk: fixed-duration thread summary.
	#[serde(rename = "wrk")]
	FixedDuration,
	/// k6: JSON summary export.
	#[serde(rename = "k6")]
	StructuredMetrics,
}

impl Tool {
	/// Every tool, in the order `render` processes them.
	pub const ALL: [Tool; 4] = [Tool::FinishSummary, Tool::FixedDuration, Tool::LatencyHistogram, Tool::StructuredMetrics];

	/// File name segment and CLI spelling, e.g. `wrk2`.
	pub const fn tag(self) -> &'static str {
		match self {
			Tool::FinishSummary => "h2load",
			Tool::LatencyHistogram => "wrk2",
			Tool::FixedDuration => "wrk",
			Tool::StructuredMetrics => "k6",
		}
	}

	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.tag() == tag)
	}

	/// Metric frameworks are ranked by. wrk2 logs carry a histogram only.
	pub const fn primary_metric(self) -> Option<Metric> {
		match self {
			Tool::FinishSummary => Some(Metric::RequestsPerSec),
			Tool::FixedDuration => Some(Metric::AvgLatencyMs),
			Tool::StructuredMetrics => Some(Metric::RequestRate),
			Tool::LatencyHistogram => None,
		}
	}

	/// Recognize the tool from a file name ending in `.<tool>.log`.
	pub fn from_file_name(name: &str) -> Option<Self> {
		let stem = name.strip_suffix(".log")?;
		let (_, tag) = stem.rsplit_once('.')?;
		Self::from_tag(tag)
	}
}

impl fmt::Display for Tool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.tag()) }
}

impl FromStr for Tool {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_tag(&s.to_ascii_lowercase()).ok_or_else(|| format!("unknown tool: {s} (expected h2load, wrk, wrk2 or k6)"))
	}
}

/// Which end of a metric's range is "best".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Throughput-like; ranked descending.
	HigherIsBetter,
	/// Latency-like; ranked ascending.
	LowerIsBetter,
}

/// Named scalar metric extracted from a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
	/// h2load overall requests per second.
	RequestsPerSec,
	/// wrk average latency, normalized to milliseconds.
	AvgLatencyMs,
	/// wrk average per-thread requests per second.
	AvgReqPerSec,
	/// k6 `http_req_duration{expected_response:true}` average.
	AvgDurationMs,
	/// k6 `http_reqs` rate.
	RequestRate,
	/// k6 `checks` pass ratio.
	ChecksPassRate,
	/// k6 `vus_max` peak.
	MaxVus,
}

impl Metric {
	/// Ranking direction of this metric.
	pub const fn direction(self) -> Direction {
		match self {
			Metric::AvgLatencyMs | Metric::AvgDurationMs => Direction::LowerIsBetter,
			_ => Direction::HigherIsBetter,
		}
	}

	/// Axis label used in exported charts.
	pub const fn label(self) -> &'static str {
		match self {
			Metric::RequestsPerSec => "Requests per Second (RPS)",
			Metric::AvgLatencyMs => "Avg Latency (ms), lower is better",
			Metric::AvgReqPerSec => "Avg Req/Sec",
			Metric::AvgDurationMs => "Avg Duration (ms)",
			Metric::RequestRate => "Req Rate (req/s)",
			Metric::ChecksPassRate => "Checks Passed (ratio)",
			Metric::MaxVus => "Max VUs",
		}
	}
}

/// One (percentile, latency) sample of a wrk2 histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyPoint {
	/// Fraction in `0.0..=1.0`.
	pub percentile: f64,
	/// Latency at that percentile, in milliseconds.
	pub latency_ms: f64,
}

/// Everything extracted from one log file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
	/// Tool that produced the log.
	pub tool: Tool,
	/// Capitalized framework name from the file name.
	pub framework: String,
	/// Capitalized benchmark name from the file name.
	pub benchmark: String,
	/// First line of the log (the load generator invocation). k6 summaries have none.
	pub command: Option<String>,
	/// Scalar metrics; empty for wrk2.
	pub metrics: BTreeMap<Metric, f64>,
	/// Percentile spectrum; wrk2 only.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub histogram: Vec<LatencyPoint>,
}

impl LogRecord {
	/// Value of `m`, if this record carries it.
	pub fn metric(&self, m: Metric) -> Option<f64> { self.metrics.get(&m).copied() }
}

/// Contents of a log file before it is attached to a framework/benchmark.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ParsedLog {
	pub command: Option<String>,
	pub metrics: BTreeMap<Metric, f64>,
	pub histogram: Vec<LatencyPoint>,
}

impl ParsedLog {
	/// Attach the names derived from the file name.
	pub fn into_record(self, tool: Tool, framework: String, benchmark: String) -> LogRecord {
		LogRecord { tool, framework, benchmark, command: self.command, metrics: self.metrics, histogram: self.histogram }
	}
}
