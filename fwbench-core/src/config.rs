#![forbid(unsafe_code)]

//! Run configuration: directories, log level and output file name templates.

use crate::error::{Error, Result};
use crate::types::Tool;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

/// Placeholder substituted with the benchmark name in per-benchmark templates.
pub const BENCHMARK_PLACEHOLDER: &str = "{benchmark}";

/// Per-chart output file name templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputTemplates {
	/// h2load chart file.
	pub h2load: String,
	/// wrk chart file.
	pub wrk: String,
	/// One file per benchmark; must contain `{benchmark}`.
	pub wrk2: String,
	/// k6 chart file.
	pub k6: String,
}

impl Default for OutputTemplates {
	fn default() -> Self {
		Self {
			h2load: "h2load-charts.html".into(),
			wrk: "wrk_charts.html".into(),
			wrk2: "wrk2-charts-{benchmark}.html".into(),
			k6: "k6_charts.html".into(),
		}
	}
}

impl OutputTemplates {
	/// Raw template for `tool`.
	pub fn template(&self, tool: Tool) -> &str {
		match tool {
			Tool::FinishSummary => &self.h2load,
			Tool::FixedDuration => &self.wrk,
			Tool::LatencyHistogram => &self.wrk2,
			Tool::StructuredMetrics => &self.k6,
		}
	}

	/// Output file name for a tool's chart, with `{benchmark}` substituted when given.
	pub fn file_name(&self, tool: Tool, benchmark: Option<&str>) -> String {
		let t = self.template(tool);
		match benchmark {
			Some(b) => t.replace(BENCHMARK_PLACEHOLDER, b),
			None => t.to_string(),
		}
	}
}

/// Effective settings; every field has a default so partial TOML files load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
	/// Directory scanned for `*.<tool>.log` files.
	pub results_dir: PathBuf,
	/// Directory charts are exported to. Must already exist.
	pub output_dir: PathBuf,
	/// `trace`, `debug`, `info`, `warn` or `error`. `RUST_LOG` wins when set.
	pub log_level: String,
	/// Chart file name templates.
	pub outputs: OutputTemplates,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			results_dir: PathBuf::from("/results"),
			output_dir: PathBuf::from("/results"),
			log_level: "info".into(),
			outputs: OutputTemplates::default(),
		}
	}
}

impl Config {
	/// Read and validate a TOML file.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Override fields from `FWBENCH_*` variables; blank values are ignored.
	pub fn apply_env(&mut self) {
		if let Some(v) = env_non_empty("FWBENCH_RESULTS_DIR") { self.results_dir = PathBuf::from(v); }
		if let Some(v) = env_non_empty("FWBENCH_OUTPUT_DIR") { self.output_dir = PathBuf::from(v); }
		if let Some(v) = env_non_empty("FWBENCH_LOG_LEVEL") { self.log_level = v.to_ascii_lowercase(); }
	}

	/// Reject unknown log levels and unusable output templates.
	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		for tool in Tool::ALL {
			let t = self.outputs.template(tool);
			if t.trim().is_empty() {
				return Err(Error::config(format!("empty output template for {tool}")));
			}
			if t.contains('/') || t.contains('\\') {
				return Err(Error::config(format!("output template for {tool} must be a file name: {t}")));
			}
		}
		if !self.outputs.wrk2.contains(BENCHMARK_PLACEHOLDER) {
			return Err(Error::config(format!("wrk2 output template must contain {BENCHMARK_PLACEHOLDER}")));
		}
		Ok(())
	}

	/// Fails when the export directory is missing; nothing is written in that case.
	pub fn ensure_output_dir(&self) -> Result<()> {
		if self.output_dir.is_dir() {
			Ok(())
		} else {
			Err(Error::config(format!("output directory does not exist: {}", self.output_dir.display())))
		}
	}
}

fn env_non_empty(key: &str) -> Option<String> {
	std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Commented TOML template written by `fwbench config write-template`.
pub const TEMPLATE_TOML: &str = r#"# fwbench configuration
# Environment overrides: FWBENCH_RESULTS_DIR, FWBENCH_OUTPUT_DIR, FWBENCH_LOG_LEVEL

# Directory holding <framework>.<tag>.<benchmark>.<tool>.log files
results_dir = "/results"
# Directory charts are written to (must exist)
output_dir = "/results"
# trace | debug | info | warn | error
log_level = "info"

[outputs]
h2load = "h2load-charts.html"
wrk = "wrk_charts.html"
# one file per benchmark
wrk2 = "wrk2-charts-{benchmark}.html"
k6 = "k6_charts.html"
"#;
