#![forbid(unsafe_code)]

//! fwbench core — turns load-generator logs into framework comparison charts
//!
//! - Filename classification (`<framework>.<tag>.<benchmark>.<tool>.log`)
//! - Parsers for h2load, wrk, wrk2 and k6 output behind `parser::LogParser`
//! - Per-benchmark ranking and relative percentages (`aggregate`)
//! - Chart descriptions and standalone HTML export (`chart`, `export`)
//!
//! Everything is synchronous; each file is read, parsed and dropped in turn.

pub mod aggregate;
pub mod chart;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod scan;
pub mod types;

pub use aggregate::{aggregate, MetricTable, Ranked};
pub use chart::{build_charts, Chart, Panel};
pub use classify::{classify, Classified};
pub use config::{Config, OutputTemplates};
pub use error::{Error, Result};
pub use export::{export_chart, ChartRenderer, HtmlRenderer};
pub use parser::{parse_record, parser_for, LogParser};
pub use pipeline::render_tool;
pub use scan::{scan_tool, ScanReport};
pub use types::{Direction, LatencyPoint, LogRecord, Metric, Tool};
