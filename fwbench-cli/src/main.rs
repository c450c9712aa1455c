#![forbid(unsafe_code)]

//! `fwbench`: render framework comparison charts from load-generator logs.

use clap::{Parser, Subcommand, ValueEnum};
use fwbench_core::config::TEMPLATE_TOML;
use fwbench_core::{render_tool, scan_tool, Config, Error, HtmlRenderer, Tool};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod summary;

#[derive(Debug, Parser)]
#[command(name = "fwbench", version, about = "Framework benchmark log parser and chart exporter")]
struct Cli {
	/// Config file (TOML). Falls back to FWBENCH_CONFIG when omitted
	#[arg(long)]
	config: Option<PathBuf>,
	/// Directory holding <framework>.<tag>.<benchmark>.<tool>.log files
	#[arg(long)]
	results_dir: Option<PathBuf>,
	/// Directory charts are written to (must exist)
	#[arg(long)]
	output_dir: Option<PathBuf>,
	/// trace | debug | info | warn | error (RUST_LOG takes precedence)
	#[arg(long)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Export HTML charts for each tool (all tools when none given)
	Render {
		/// h2load | wrk | wrk2 | k6; repeatable
		#[arg(long = "tool")]
		tools: Vec<Tool>,
	},
	/// Print ranked per-benchmark tables
	Summary {
		#[arg(long = "tool")]
		tools: Vec<Tool>,
		#[arg(long, value_enum, default_value_t = Format::Table)]
		format: Format,
	},
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show effective config (defaults, file, env, flags)
	Show,
	/// Write a fwbench.toml template
	WriteTemplate {
		/// Destination path (default: ./fwbench.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if file exists
		#[arg(long)]
		force: bool,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
	Table,
	Json,
}

/// Defaults, then the TOML file, then FWBENCH_* env, then command line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
	let file = cli
		.config
		.clone()
		.or_else(|| std::env::var("FWBENCH_CONFIG").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from));
	let mut cfg = match file {
		Some(path) => Config::load_from_file(&path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?,
		None => Config::default(),
	};
	cfg.apply_env();
	if let Some(d) = &cli.results_dir { cfg.results_dir = d.clone(); }
	if let Some(d) = &cli.output_dir { cfg.output_dir = d.clone(); }
	if let Some(l) = &cli.log_level { cfg.log_level = l.to_ascii_lowercase(); }
	cfg.validate()?;
	Ok(cfg)
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}

fn selected(tools: &[Tool]) -> Vec<Tool> {
	if tools.is_empty() { Tool::ALL.to_vec() } else { tools.to_vec() }
}

fn cmd_render(cfg: &Config, tools: &[Tool]) -> anyhow::Result<()> {
	cfg.ensure_output_dir()?;
	for tool in selected(tools) {
		match render_tool(cfg, tool, &HtmlRenderer) {
			Ok(paths) => {
				for p in paths {
					println!("{tool} charts exported to {}", p.display());
				}
			}
			Err(e @ Error::EmptyResult(_)) => println!("{e}"),
			// One tool failing leaves the others unaffected.
			Err(e) => error!("{tool} charts not exported: {e}"),
		}
	}
	Ok(())
}

fn cmd_summary(cfg: &Config, tools: &[Tool], format: Format) -> anyhow::Result<()> {
	let mut out = serde_json::Map::new();
	for tool in selected(tools) {
		let summary = match scan_tool(&cfg.results_dir, tool).and_then(|r| summary::summarize(&r)) {
			Ok(s) => s,
			Err(e @ Error::EmptyResult(_)) => {
				if format == Format::Table { println!("{e}"); }
				continue;
			}
			Err(e) => {
				error!("{tool} summary failed: {e}");
				continue;
			}
		};
		match format {
			Format::Table => summary::print_table(tool, &summary),
			Format::Json => { out.insert(tool.tag().to_string(), summary::to_json(&summary)?); }
		}
	}
	if format == Format::Json {
		println!("{}", serde_json::to_string_pretty(&out)?);
	}
	Ok(())
}

fn cmd_config(cli: &Cli, action: &ConfigCmd) -> anyhow::Result<()> {
	match action {
		ConfigCmd::Show => {
			let cfg = resolve_config(cli)?;
			println!("{}", serde_json::to_string_pretty(&cfg)?);
			Ok(())
		}
		ConfigCmd::WriteTemplate { path, force } => {
			let path = path.clone().unwrap_or_else(|| PathBuf::from("fwbench.toml"));
			if path.exists() && !force {
				anyhow::bail!("refusing to overwrite existing file: {} (use --force)", path.display());
			}
			std::fs::write(&path, TEMPLATE_TOML)?;
			eprintln!("wrote {}", path.display());
			Ok(())
		}
	}
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	if let Command::Config { action } = &cli.command {
		return cmd_config(&cli, action);
	}

	let cfg = resolve_config(&cli)?;
	init_tracing(&cfg.log_level);

	match &cli.command {
		Command::Render { tools } => cmd_render(&cfg, tools),
		Command::Summary { tools, format } => cmd_summary(&cfg, tools, *format),
		Command::Config { .. } => Ok(()),
	}
}
