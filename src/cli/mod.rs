use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::engine::{CheckRequest, Engine, EngineOptions, Level};
use crate::render::ReportFormat;

#[derive(Debug, Parser)]
#[command(
    name = "py-env-doctor",
    version,
    about = "Diagnose Python environment issues and provide actionable fixes."
)]
pub struct Cli {
    /// Log probe details to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,
    /// Only log errors; no progress spinner.
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Config file (default: ~/.config/py-env-doctor/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run environment diagnostics and print a report.
    Check(CheckArgs),
    /// Show py-env-doctor version.
    Version,
    /// Print a shell completion script.
    Completion(CompletionArgs),
    /// Show the effective configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to the project (defaults to current directory).
    #[arg(long, default_value = ".")]
    pub project_path: PathBuf,
    /// Output format: text|json|md.
    #[arg(
        long = "format",
        visible_aliases = ["output", "fmt"],
        value_enum,
        ignore_case = true
    )]
    pub format: Option<ReportFormat>,
    /// Write report to the given file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Analysis level: basic|full.
    #[arg(long, value_enum, ignore_case = true, default_value = "basic")]
    pub level: Level,
    /// Emit raw diagnostics without advice.
    #[arg(long)]
    pub diagnostics_only: bool,
    /// Avoid network calls (reserved; no network call is ever made).
    #[arg(long = "no-network", overrides_with = "network")]
    pub no_network: bool,
    #[arg(long = "network", overrides_with = "no_network")]
    pub network: bool,
    /// Python interpreter to inspect (name on PATH or path).
    #[arg(long)]
    pub python: Option<String>,
    /// Per-probe timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::debug!(?cli, "parsed arguments");

    match &cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "py-env-doctor", &mut out);
            return Ok(());
        }
        Commands::Check(_) | Commands::Config(_) => {}
    }

    let home_dir = crate::platform::home_dir();
    let env_config_path = std::env::var_os("PY_ENV_DOCTOR_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        home_dir.as_deref(),
    )
    .map_err(crate::exit::invalid_args_err)?;

    match cli.command {
        Commands::Check(args) => {
            let format = args.format.unwrap_or(cfg.report.format);
            let timeout = args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| cfg.probe.timeout());
            if timeout.is_zero() {
                return Err(crate::exit::invalid_args(
                    "probe timeout must be greater than 0 seconds",
                ));
            }
            tracing::debug!(
                no_network = !args.network,
                level = ?args.level,
                "reserved options accepted"
            );

            let engine = Engine::new(EngineOptions {
                timeout,
                python: args.python.clone().or_else(|| cfg.runtime.python.clone()),
                show_progress: !cli.quiet && format != ReportFormat::Json,
            });
            let report = engine.check(&CheckRequest {
                project_path: args.project_path.clone(),
                level: args.level,
                diagnostics_only: args.diagnostics_only,
            })?;

            let output = crate::render::render(&report, format)?;
            crate::ui::write_output(&output, args.out.as_deref())
                .map_err(crate::exit::output_failed_err)?;
        }
        Commands::Config(args) => {
            if args.show {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&cfg)?);
                } else {
                    print!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !cli.quiet {
                eprintln!("config: use `py-env-doctor config --show`");
            }
        }
        Commands::Version | Commands::Completion(_) => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("py_env_doctor=debug")
    } else if quiet {
        EnvFilter::new("py_env_doctor=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("py_env_doctor=warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (expected bash|zsh|fish)"
        ))),
    }
}
