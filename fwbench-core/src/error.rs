#![forbid(unsafe_code)]

//! Crate error type and result alias.

use crate::types::Tool;
use thiserror::Error as ThisError;

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong between a results directory and a chart file.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Reading a log or writing a chart failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// JSON encoding of chart data failed.
	#[error("serialization error: {0}")]
	Serde(#[from] serde_json::Error),
	/// Writing a chart document into its buffer failed.
	#[error("render error: {0}")]
	Render(#[from] std::fmt::Error),
	/// A required line or pattern is missing from a log file, or a file name
	/// does not follow `<framework>.<tag>.<benchmark>.<tool>.log`.
	#[error("parse error: {0}")]
	Parse(String),
	/// A structured (k6) summary lacks an expected metric path.
	#[error("missing metric: {0}")]
	MissingMetric(String),
	/// A log parsed fine but repeats an earlier (framework, benchmark) pair.
	#[error("duplicate log for {framework} / {benchmark}")]
	Duplicate { framework: String, benchmark: String },
	/// No usable log for a tool; the tool is skipped.
	#[error("No {0} log files found.")]
	EmptyResult(Tool),
	/// Invalid configuration or a missing output directory.
	#[error("configuration error: {0}")]
	Config(String),
}

impl Error {
	/// Shorthand for [`Error::Parse`].
	pub fn parse(msg: impl Into<String>) -> Self { Error::Parse(msg.into()) }
	pub fn missing_metric(path: impl Into<String>) -> Self { Error::MissingMetric(path.into()) }
	pub fn config(msg: impl Into<String>) -> Self { Error::Config(msg.into()) }

	/// Per-file failures: the caller logs them and moves on to the next file.
	pub fn is_per_file(&self) -> bool {
		matches!(self, Error::Parse(_) | Error::MissingMetric(_) | Error::Io(_) | Error::Duplicate { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_result_message_names_tool() {
		let e = Error::EmptyResult(Tool::LatencyHistogram);
		assert_eq!(e.to_string(), "No wrk2 log files found.");
		assert!(!e.is_per_file());
	}

	#[test]
	fn parse_errors_are_per_file() {
		assert!(Error::parse("x").is_per_file());
		assert!(Error::missing_metric("metrics.http_reqs.rate").is_per_file());
		assert!(!Error::config("bad").is_per_file());
	}

	#[test]
	fn formatting_failure_converts_to_render_error() {
		let e: Error = std::fmt::Error.into();
		assert!(matches!(e, Error::Render(_)));
		assert!(!e.is_per_file());
	}

	#[test]
	fn duplicate_names_the_pair() {
		let e = Error::Duplicate { framework: "Laravel".into(), benchmark: "Api".into() };
		assert_eq!(e.to_string(), "duplicate log for Laravel / Api");
		assert!(e.is_per_file());
	}
}
