#![forbid(unsafe_code)]

//! Filename classification: `<framework>.<tag>.<benchmark>.<tool>.log`.

use crate::error::{Error, Result};
use std::path::Path;

/// Framework and benchmark names derived from a log file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
	/// First file name segment, capitalized.
	pub framework: String,
	/// Third file name segment, capitalized.
	pub benchmark: String,
}

/// Derive capitalized (framework, benchmark) names from a log path.
///
/// Example
/// -------
/// ```rust
/// use fwbench_core::classify::classify;
/// let c = classify("/results/laravel.bench.api.h2load.log").unwrap();
/// assert_eq!(c.framework, "Laravel");
/// assert_eq!(c.benchmark, "Api");
/// ```
pub fn classify(path: impl AsRef<Path>) -> Result<Classified> {
	let path = path.as_ref();
	let name = path
		.file_name()
		.and_then(|n| n.to_str())
		.ok_or_else(|| Error::parse(format!("not a file name: {}", path.display())))?;
	let parts: Vec<&str> = name.split('.').collect();
	if parts.len() < 3 {
		return Err(Error::parse(format!("expected <framework>.<tag>.<benchmark>.<tool>.log, got {name}")));
	}
	if parts[0].is_empty() || parts[2].is_empty() {
		return Err(Error::parse(format!("empty framework or benchmark segment in {name}")));
	}
	Ok(Classified { framework: capitalize(parts[0]), benchmark: capitalize(parts[2]) })
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
