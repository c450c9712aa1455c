#![forbid(unsafe_code)]

//! Per-tool log parsers behind one [`LogParser`] contract.
//!
//! - `h2load`: "finished in" summary line → requests/sec
//! - `wrk`: thread summary → average latency and requests/sec
//! - `wrk2`: latency distribution → (percentile, latency) points
//! - `k6`: JSON summary export → duration, rate, checks, VUs

pub mod h2load;
pub mod k6;
pub mod wrk;
pub mod wrk2;

use crate::classify::Classified;
use crate::error::{Error, Result};
use crate::types::{LogRecord, ParsedLog, Tool};

pub use h2load::FinishSummaryParser;
pub use k6::StructuredMetricsParser;
pub use wrk::FixedDurationParser;
pub use wrk2::LatencyHistogramParser;

/// Extracts metrics from the full text of one log file.
pub trait LogParser {
	/// Tool whose output this parser understands.
	fn tool(&self) -> Tool;
	/// Extract the command line and metrics, or fail with a per-file error.
	fn parse(&self, content: &str) -> Result<ParsedLog>;
}

/// Parser registered for a tool.
pub fn parser_for(tool: Tool) -> &'static dyn LogParser {
	match tool {
		Tool::FinishSummary => &FinishSummaryParser,
		Tool::LatencyHistogram => &LatencyHistogramParser,
		Tool::FixedDuration => &FixedDurationParser,
		Tool::StructuredMetrics => &StructuredMetricsParser,
	}
}

/// Parse `content` with the tool's parser and attach the classified names.
pub fn parse_record(tool: Tool, names: Classified, content: &str) -> Result<LogRecord> {
	let parsed = parser_for(tool).parse(content)?;
	Ok(parsed.into_record(tool, names.framework, names.benchmark))
}

/// First line of a log, trimmed. Used as the command string in chart titles.
pub(crate) fn command_line(content: &str) -> Option<String> {
	content.lines().next().map(|l| l.trim().to_string())
}

/// Parse a number and hold it to the non-negative finite range.
pub(crate) fn metric_value(raw: &str, what: &str) -> Result<f64> {
	let v: f64 = raw.trim().parse().map_err(|e| Error::parse(format!("invalid {what} {raw:?}: {e}")))?;
	if !v.is_finite() || v < 0.0 {
		return Err(Error::parse(format!("{what} out of range: {v}")));
	}
	Ok(v)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dispatch_matches_tool() {
		for tool in Tool::ALL {
			assert_eq!(parser_for(tool).tool(), tool);
		}
	}

	#[test]
	fn metric_value_rejects_non_finite() {
		assert!(metric_value("inf", "req/s").is_err());
		assert!(metric_value("NaN", "req/s").is_err());
		assert!(metric_value("-1.0", "req/s").is_err());
		assert_eq!(metric_value(" 42.5 ", "req/s").unwrap(), 42.5);
	}

	#[test]
	fn parse_record_carries_names() {
		let names = Classified { framework: "Laravel".into(), benchmark: "Api".into() };
		let rec = parse_record(Tool::FinishSummary, names, "h2load -n 10 http://x\nfinished in 1.00s, 10.00 req/s, 1KB/s\n").unwrap();
		assert_eq!(rec.framework, "Laravel");
		assert_eq!(rec.benchmark, "Api");
		assert_eq!(rec.tool, Tool::FinishSummary);
	}
}
