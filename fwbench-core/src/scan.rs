#![forbid(unsafe_code)]

//! Non-recursive scan of a results directory for one tool's logs.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::parser::parse_record;
use crate::types::{LogRecord, Tool};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A log file that could not be used, with the reason.
#[derive(Debug)]
pub struct Skipped {
	/// The skipped file.
	pub path: PathBuf,
	/// Why it was skipped; always a per-file error (see [`Error::is_per_file`]).
	pub error: Error,
}

/// Outcome of scanning one tool's logs in a results directory.
#[derive(Debug)]
pub struct ScanReport {
	/// Tool whose logs were scanned.
	pub tool: Tool,
	/// Parsed records in scan (file name) order.
	pub records: Vec<LogRecord>,
	/// Files left out, in scan order.
	pub skipped: Vec<Skipped>,
}

/// Regular files in `dir` whose name ends in `.<tool>.log`, sorted by file name.
pub fn list_logs(dir: impl AsRef<Path>, tool: Tool) -> Result<Vec<PathBuf>> {
	let mut paths = Vec::new();
	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		if !entry.file_type()?.is_file() {
			continue;
		}
		let name = entry.file_name();
		if name.to_str().and_then(Tool::from_file_name) == Some(tool) {
			paths.push(entry.path());
		}
	}
	paths.sort();
	Ok(paths)
}

/// Classify, read and parse a single log file.
pub fn read_record(path: impl AsRef<Path>, tool: Tool) -> Result<LogRecord> {
	let path = path.as_ref();
	let names = classify(path)?;
	let content = fs::read_to_string(path)?;
	parse_record(tool, names, &content)
}

/// Parse every `tool` log in `dir`.
///
/// Files that fail to classify or parse are logged and skipped, as are later
/// files repeating an earlier (framework, benchmark) pair. A directory without
/// any matching file is [`Error::EmptyResult`].
pub fn scan_tool(dir: impl AsRef<Path>, tool: Tool) -> Result<ScanReport> {
	let paths = list_logs(dir, tool)?;
	if paths.is_empty() {
		return Err(Error::EmptyResult(tool));
	}
	let mut report = ScanReport { tool, records: Vec::with_capacity(paths.len()), skipped: Vec::new() };
	let mut seen = HashSet::new();
	for path in paths {
		match read_record(&path, tool) {
			Ok(rec) => {
				if !seen.insert((rec.framework.clone(), rec.benchmark.clone())) {
					warn!(path = %path.display(), framework = %rec.framework, benchmark = %rec.benchmark, "duplicate {tool} log, skipping");
					let LogRecord { framework, benchmark, .. } = rec;
					report.skipped.push(Skipped { path, error: Error::Duplicate { framework, benchmark } });
					continue;
				}
				debug!(path = %path.display(), "parsed {tool} log");
				report.records.push(rec);
			}
			Err(error) if error.is_per_file() => {
				warn!(path = %path.display(), "skipping {tool} log: {error}");
				report.skipped.push(Skipped { path, error });
			}
			Err(error) => return Err(error),
		}
	}
	Ok(report)
}
