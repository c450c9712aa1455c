#![forbid(unsafe_code)]

//! wrk thread-stats parser.

use super::{command_line, metric_value, LogParser};
use crate::error::{Error, Result};
use crate::types::{Metric, ParsedLog, Tool};
use once_cell::sync::Lazy;
use regex::Regex;

static LATENCY: Lazy<Regex> = Lazy::new(|| Regex::new(r"Latency\s+(\d+\.\d+)(us|ms|s)").expect("latency pattern"));
static REQ_SEC: Lazy<Regex> = Lazy::new(|| Regex::new(r"Req/Sec\s+(\d+\.\d+)([kM]?)").expect("req/sec pattern"));

/// wrk thread summary (`Latency 12.34ms ...`, `Req/Sec 3.45k ...`), averages only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDurationParser;

impl LogParser for FixedDurationParser {
	fn tool(&self) -> Tool { Tool::FixedDuration }

	fn parse(&self, content: &str) -> Result<ParsedLog> {
		let lat = LATENCY.captures(content).ok_or_else(|| Error::parse("no Latency line in wrk log"))?;
		let req = REQ_SEC.captures(content).ok_or_else(|| Error::parse("no Req/Sec line in wrk log"))?;

		let latency_ms = metric_value(&lat[1], "latency")? * latency_scale(&lat[2]);
		let req_per_sec = metric_value(&req[1], "req/sec")? * throughput_scale(&req[2]);

		let mut parsed = ParsedLog { command: command_line(content), ..ParsedLog::default() };
		parsed.metrics.insert(Metric::AvgLatencyMs, latency_ms);
		parsed.metrics.insert(Metric::AvgReqPerSec, req_per_sec);
		Ok(parsed)
	}
}

/// Factor to milliseconds.
fn latency_scale(unit: &str) -> f64 {
	match unit {
		"s" => 1000.0,
		"us" => 0.001,
		_ => 1.0,
	}
}

fn throughput_scale(suffix: &str) -> f64 {
	match suffix {
		"k" => 1_000.0,
		"M" => 1_000_000.0,
		_ => 1.0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn log(latency: &str, req: &str) -> String {
		format!(
			"wrk -t4 -c100 -d30s http://symfony.bench:8080/films
Running 30s test @ http://symfony.bench:8080/films
  4 threads and 100 connections
  Thread Stats   Avg      Stdev     Max   +/- Stdev
    Latency   {latency}    4.56ms 100.00ms   90.00%
    Req/Sec   {req}   123.45     4.00k    70.00%
  412345 requests in 30.01s, 1.23GB read
Requests/sec:  13740.12
"
		)
	}

	#[test]
	fn normalizes_ms_and_k() {
		let p = FixedDurationParser.parse(&log("12.34ms", "3.45k")).unwrap();
		assert_eq!(p.metrics[&Metric::AvgLatencyMs], 12.34);
		assert_eq!(p.metrics[&Metric::AvgReqPerSec], 3450.0);
		assert_eq!(p.command.as_deref(), Some("wrk -t4 -c100 -d30s http://symfony.bench:8080/films"));
	}

	#[test]
	fn seconds_become_milliseconds() {
		let p = FixedDurationParser.parse(&log("1.20s", "812.50")).unwrap();
		assert_eq!(p.metrics[&Metric::AvgLatencyMs], 1200.0);
		assert_eq!(p.metrics[&Metric::AvgReqPerSec], 812.5);
	}

	#[test]
	fn millions_suffix_scales_throughput() {
		let p = FixedDurationParser.parse(&log("1.50s", "1.50M")).unwrap();
		assert_eq!(p.metrics[&Metric::AvgLatencyMs], 1500.0);
		assert_eq!(p.metrics[&Metric::AvgReqPerSec], 1_500_000.0);
	}

	#[test]
	fn microseconds_become_milliseconds() {
		let p = FixedDurationParser.parse(&log("500.00us", "9.10k")).unwrap();
		assert!((p.metrics[&Metric::AvgLatencyMs] - 0.5).abs() < 1e-12);
	}

	#[test]
	fn missing_patterns_are_parse_errors() {
		assert!(matches!(FixedDurationParser.parse("wrk\n    Req/Sec   1.00k\n"), Err(Error::Parse(_))));
		assert!(matches!(FixedDurationParser.parse("wrk\n    Latency   1.00ms\n"), Err(Error::Parse(_))));
	}
}
