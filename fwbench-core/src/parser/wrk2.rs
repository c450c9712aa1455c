#![forbid(unsafe_code)]

//! wrk2 latency spectrum parser.

use super::{command_line, LogParser};
use crate::error::{Error, Result};
use crate::types::{LatencyPoint, ParsedLog, Tool};

/// Highest percentile kept; the extreme tail would flatten the rest of the chart.
pub const PERCENTILE_CUTOFF: f64 = 0.992;

/// wrk2 `--latency` detailed percentile spectrum (`Value Percentile TotalCount ...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencyHistogramParser;

impl LogParser for LatencyHistogramParser {
	fn tool(&self) -> Tool { Tool::LatencyHistogram }

	fn parse(&self, content: &str) -> Result<ParsedLog> {
		let histogram: Vec<LatencyPoint> = content
			.lines()
			.skip(1)
			.filter(|l| !l.trim().is_empty() && !l.contains("Value") && !l.contains("inf"))
			.filter_map(spectrum_point)
			.filter(|p| p.percentile <= PERCENTILE_CUTOFF)
			.collect();
		if histogram.is_empty() {
			return Err(Error::parse("no latency percentile rows in wrk2 log"));
		}
		Ok(ParsedLog { command: command_line(content), histogram, ..ParsedLog::default() })
	}
}

/// `<latency> <percentile> ...`; anything else is not a spectrum row.
fn spectrum_point(line: &str) -> Option<LatencyPoint> {
	let mut tokens = line.split_whitespace();
	let latency_ms: f64 = tokens.next()?.parse().ok()?;
	let percentile: f64 = tokens.next()?.parse().ok()?;
	if !latency_ms.is_finite() || !percentile.is_finite() || latency_ms < 0.0 || percentile < 0.0 {
		return None;
	}
	Some(LatencyPoint { percentile, latency_ms })
}
