#![forbid(unsafe_code)]

//! h2load summary parser.

use super::{command_line, metric_value, LogParser};
use crate::error::{Error, Result};
use crate::types::{Metric, ParsedLog, Tool};

/// h2load summary, e.g. `finished in 10.01s, 4995.38 req/s, 1.52MB/s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinishSummaryParser;

impl LogParser for FinishSummaryParser {
	fn tool(&self) -> Tool { Tool::FinishSummary }

	fn parse(&self, content: &str) -> Result<ParsedLog> {
		let line = content
			.lines()
			.find(|l| l.contains("finished in"))
			.ok_or_else(|| Error::parse("no \"finished in\" line in h2load log"))?;
		let segment = line
			.split(", ")
			.nth(1)
			.ok_or_else(|| Error::parse(format!("malformed h2load summary: {line:?}")))?;
		let (raw, _) = segment
			.split_once("req/s")
			.ok_or_else(|| Error::parse(format!("no req/s in h2load summary: {line:?}")))?;
		let rps = metric_value(raw, "req/s")?;

		let mut parsed = ParsedLog { command: command_line(content), ..ParsedLog::default() };
		parsed.metrics.insert(Metric::RequestsPerSec, rps);
		Ok(parsed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LOG: &str = "h2load -n 100000 -c 100 -t 4 http://laravel.bench:8080/benchmarking/api
starting benchmark...
spawning thread #0: 25 total client(s). 25000 total requests

finished in 20.02s, 4995.38 req/s, 1.52MB/s
requests: 100000 total, 100000 started, 100000 done, 100000 succeeded, 0 failed, 0 errored, 0 timeout
";

	#[test]
	fn extracts_req_per_sec_and_command() {
		let p = FinishSummaryParser.parse(LOG).unwrap();
		assert_eq!(p.metrics[&Metric::RequestsPerSec], 4995.38);
		assert_eq!(p.command.as_deref(), Some("h2load -n 100000 -c 100 -t 4 http://laravel.bench:8080/benchmarking/api"));
	}

	#[test]
	fn missing_summary_is_parse_error() {
		let err = FinishSummaryParser.parse("h2load ...\nstarting benchmark...\n").unwrap_err();
		assert!(matches!(err, Error::Parse(_)));
	}

	#[test]
	fn malformed_number_is_parse_error() {
		assert!(FinishSummaryParser.parse("cmd\nfinished in 1s, lots req/s, 1MB/s\n").is_err());
		assert!(FinishSummaryParser.parse("cmd\nfinished in 1s\n").is_err());
	}
}
