#![forbid(unsafe_code)]

//! k6 JSON summary parser.

use super::LogParser;
use crate::error::{Error, Result};
use crate::types::{Metric, ParsedLog, Tool};
use serde_json::Value;

/// (metric key under `metrics`, field, destination).
const PATHS: [(&str, &str, Metric); 4] = [
	("http_req_duration{expected_response:true}", "avg", Metric::AvgDurationMs),
	("http_reqs", "rate", Metric::RequestRate),
	("checks", "value", Metric::ChecksPassRate),
	("vus_max", "max", Metric::MaxVus),
];

/// k6 JSON summary (`--summary-export`, or the `handleSummary` layout with nested `values`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredMetricsParser;

impl LogParser for StructuredMetricsParser {
	fn tool(&self) -> Tool { Tool::StructuredMetrics }

	fn parse(&self, content: &str) -> Result<ParsedLog> {
		let doc: Value = serde_json::from_str(content).map_err(|e| Error::parse(format!("invalid k6 JSON summary: {e}")))?;
		let mut parsed = ParsedLog::default();
		for (key, field, metric) in PATHS {
			let v = lookup(&doc, key, field).ok_or_else(|| Error::missing_metric(format!("metrics.{key}.{field}")))?;
			if v < 0.0 {
				return Err(Error::parse(format!("metrics.{key}.{field} is negative: {v}")));
			}
			parsed.metrics.insert(metric, v);
		}
		Ok(parsed)
	}
}

fn lookup(doc: &Value, key: &str, field: &str) -> Option<f64> {
	let m = doc.get("metrics")?.get(key)?;
	m.get(field)
		.or_else(|| m.get("values").and_then(|vals| vals.get(field)))
		.and_then(Value::as_f64)
		.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn summary_export() -> Value {
		json!({
			"root_group": { "name": "", "path": "", "checks": {} },
			"metrics": {
				"http_req_duration{expected_response:true}": { "avg": 38.2, "min": 1.1, "med": 20.0, "max": 912.4, "p(90)": 80.0, "p(95)": 120.0 },
				"http_reqs": { "count": 51234, "rate": 853.9 },
				"checks": { "passes": 51200, "fails": 34, "value": 0.9993 },
				"vus_max": { "value": 400, "min": 400, "max": 400 }
			}
		})
	}

	#[test]
	fn reads_all_four_paths() {
		let p = StructuredMetricsParser.parse(&summary_export().to_string()).unwrap();
		assert_eq!(p.metrics[&Metric::AvgDurationMs], 38.2);
		assert_eq!(p.metrics[&Metric::RequestRate], 853.9);
		assert_eq!(p.metrics[&Metric::ChecksPassRate], 0.9993);
		assert_eq!(p.metrics[&Metric::MaxVus], 400.0);
		assert!(p.command.is_none());
	}

	#[test]
	fn reads_nested_values_layout() {
		let doc = json!({
			"metrics": {
				"http_req_duration{expected_response:true}": { "type": "trend", "values": { "avg": 12.5 } },
				"http_reqs": { "type": "counter", "values": { "count": 10, "rate": 99.0 } },
				"checks": { "type": "rate", "values": { "passes": 10, "fails": 0, "value": 1.0 } },
				"vus_max": { "type": "gauge", "values": { "value": 50, "min": 50, "max": 50 } }
			}
		});
		let p = StructuredMetricsParser.parse(&doc.to_string()).unwrap();
		assert_eq!(p.metrics[&Metric::RequestRate], 99.0);
		assert_eq!(p.metrics[&Metric::MaxVus], 50.0);
	}

	#[test]
	fn missing_path_names_it() {
		let mut doc = summary_export();
		doc["metrics"].as_object_mut().unwrap().remove("http_reqs");
		match StructuredMetricsParser.parse(&doc.to_string()) {
			Err(Error::MissingMetric(path)) => assert_eq!(path, "metrics.http_reqs.rate"),
			other => panic!("unexpected: {other:?}"),
		}
	}

	#[test]
	fn non_numeric_value_is_missing() {
		let mut doc = summary_export();
		doc["metrics"]["checks"]["value"] = json!("n/a");
		assert!(matches!(StructuredMetricsParser.parse(&doc.to_string()), Err(Error::MissingMetric(_))));
	}

	#[test]
	fn malformed_json_is_parse_error() {
		assert!(matches!(StructuredMetricsParser.parse("k6 run script.js\n"), Err(Error::Parse(_))));
	}
}
