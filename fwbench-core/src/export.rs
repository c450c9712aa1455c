#![forbid(unsafe_code)]

//! Chart export. [`HtmlRenderer`] writes a standalone page (no external
//! assets): one table per panel plus the chart as an embedded JSON block
//! for any plotting front-end to pick up.

use crate::chart::{Chart, Panel};
use crate::error::Result;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Turns a chart description into a document.
pub trait ChartRenderer {
	/// Full document text for `chart`.
	fn render(&self, chart: &Chart) -> Result<String>;
}

/// Standalone HTML page: escaped text, one table per panel, embedded JSON data.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ChartRenderer for HtmlRenderer {
	fn render(&self, chart: &Chart) -> Result<String> {
		let data = serde_json::to_string(chart)?.replace("</", "<\\/");
		let mut body = String::new();
		for panel in &chart.panels {
			render_panel(&mut body, panel)?;
		}
		let subtitle = chart
			.subtitle
			.as_deref()
			.map(|s| format!("<p class=\"subtitle\">({})</p>\n", html_escape(s)))
			.unwrap_or_default();
		Ok(format!(
			r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
{subtitle}{body}<script type="application/json" id="chart-data">{data}</script>
</body>
</html>
"#,
			title = html_escape(&chart.title),
		))
	}
}

fn render_panel(out: &mut String, panel: &Panel) -> fmt::Result {
	match panel {
		Panel::Bars { title, axis, bars, .. } => {
			writeln!(out, "<section>\n<h2>{}</h2>\n<table>", html_escape(title))?;
			writeln!(out, "<tr><th>Framework</th><th>{}</th><th>%</th></tr>", html_escape(axis))?;
			for b in bars {
				writeln!(out, "<tr><td>{}</td><td>{:.2}</td><td>{:.2}%</td></tr>", html_escape(&b.label), b.value, b.percentage)?;
			}
			out.push_str("</table>\n</section>\n");
		}
		Panel::Lines { title, x_axis, y_axis, series } => {
			writeln!(out, "<section>\n<h2>{}</h2>", html_escape(title))?;
			for s in series {
				writeln!(out, "<h3>{}</h3>\n<table>", html_escape(&s.name))?;
				writeln!(out, "<tr><th>{}</th><th>{}</th></tr>", html_escape(x_axis), html_escape(y_axis))?;
				for p in &s.points {
					writeln!(out, "<tr><td>{}</td><td>{:.3}</td></tr>", p.percentile, p.latency_ms)?;
				}
				out.push_str("</table>\n");
			}
			out.push_str("</section>\n");
		}
	}
	Ok(())
}

fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}

/// Render `chart` and write it to `<output_dir>/<chart.file_name>`.
pub fn export_chart(chart: &Chart, output_dir: impl AsRef<Path>, renderer: &dyn ChartRenderer) -> Result<PathBuf> {
	let path = output_dir.as_ref().join(&chart.file_name);
	let doc = renderer.render(chart)?;
	fs::write(&path, doc)?;
	info!(path = %path.display(), tool = %chart.tool, "exported chart");
	Ok(path)
}
