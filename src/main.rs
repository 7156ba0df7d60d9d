use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bundle_config::ConfigBuilder;
use bundle_config::config::{
	BuildMode, DevServerPort, OPTIONS_FILE_NAME, generate_init_template, load_overrides,
	resolve_options,
};

#[derive(Parser)]
#[command(name = "bundle-config")]
#[command(
	author,
	version,
	about = "Build layered bundler configurations from a small options file"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Create a template bundle-config.toml in the current directory
	Init {
		/// Overwrite an existing bundle-config.toml
		#[arg(long)]
		force: bool,
	},
	/// Print the final configuration as JSON
	Show(ShowArgs),
	/// Check the options file for errors without building anything
	Validate {
		/// Options file (default: nearest bundle-config.toml above the cwd)
		#[arg(long, value_name = "FILE")]
		options: Option<PathBuf>,
	},
}

#[derive(Args)]
struct ShowArgs {
	/// Options file (default: nearest bundle-config.toml above the cwd)
	#[arg(long, value_name = "FILE")]
	options: Option<PathBuf>,

	/// Build for production (default: taken from NODE_ENV)
	#[arg(long, conflicts_with = "development")]
	production: bool,

	/// Build for development
	#[arg(long)]
	development: bool,

	/// Target environment, e.g. `node` or `browserslist`
	#[arg(long, value_name = "LABEL")]
	target: Option<String>,

	/// Enable the development server
	#[arg(long)]
	dev_server: bool,

	/// Development server port (default: auto)
	#[arg(long, value_name = "PORT", requires = "dev_server")]
	port: Option<u16>,

	/// Merge a JSON or TOML document; its sequences replace existing ones
	#[arg(long = "merge", value_name = "FILE")]
	merge: Vec<PathBuf>,

	/// Apply a JSON or TOML additions document; its rules and plugins are appended
	#[arg(long = "extend", value_name = "FILE")]
	extend: Vec<PathBuf>,

	/// Print single-line JSON
	#[arg(long)]
	compact: bool,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "bundle_config=warn".into()),
		)
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Init { force } => handle_init(force),
		Commands::Show(args) => handle_show(&args),
		Commands::Validate { options } => handle_validate(options.as_deref()),
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let options_path = PathBuf::from(OPTIONS_FILE_NAME);

	if options_path.exists() && !force {
		anyhow::bail!("{OPTIONS_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&options_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", options_path.display()))?;

	println!("Created {OPTIONS_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn build_mode(args: &ShowArgs) -> BuildMode {
	if args.production {
		BuildMode::Production
	} else if args.development {
		BuildMode::Development
	} else {
		BuildMode::from_node_env(std::env::var("NODE_ENV").ok().as_deref())
	}
}

fn handle_show(args: &ShowArgs) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded =
		resolve_options(args.options.as_deref(), &cwd).context("Failed to load options")?;

	let mut builder = ConfigBuilder::with_mode(loaded.options, build_mode(args));

	for path in &args.extend {
		let additions =
			load_overrides(path).with_context(|| format!("Failed to load {}", path.display()))?;
		builder.extend(&additions);
	}

	for path in &args.merge {
		let overrides =
			load_overrides(path).with_context(|| format!("Failed to load {}", path.display()))?;
		builder.merge(&overrides);
	}

	if let Some(ref target) = args.target {
		builder
			.set_target(target)
			.with_context(|| format!("Failed to apply target: {}", target))?;
	}

	if args.dev_server {
		builder.enable_dev_server(DevServerPort::from(args.port));
	}

	let config = builder.get();
	let rendered = if args.compact {
		serde_json::to_string(&config)
	} else {
		serde_json::to_string_pretty(&config)
	}
	.context("Failed to serialize configuration")?;

	println!("{}", rendered);
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(options: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match resolve_options(options, &cwd) {
		Ok(loaded) => {
			println!("Options file is valid: {}", loaded.path.display());
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Options error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
