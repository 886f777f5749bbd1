use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neuro_config::{CheckStatus, Config, Overrides, default_config_file, run_checks};

#[derive(Parser)]
#[command(name = "neuro", about = "Neuromorphic system configuration inspector")]
struct Cli {
    /// Override project auto-detection
    #[arg(long, global = true)]
    project: Option<String>,

    /// Override the brain database path
    #[arg(long, global = true)]
    brain_db: Option<PathBuf>,

    /// Override the neuromorphic root directory
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Read this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Show {
        /// Emit JSON instead of the key/value listing
        #[arg(long)]
        json: bool,
    },

    /// Probe the configured paths and report their state
    Check,

    /// Write the resolved configuration to a config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        project: cli.project.clone(),
        brain_db: cli.brain_db.clone(),
        root: cli.root.clone(),
        config_file: cli.config.clone(),
    }
}

fn resolve(cli: &Cli) -> Result<Config> {
    let config =
        Config::resolve(&overrides(cli)).context("failed to resolve configuration")?;
    config
        .validate()
        .context("resolved configuration is invalid")?;
    Ok(config)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Show { json } => cmd_show(&cli, *json),
        Commands::Check => cmd_check(&cli),
        Commands::Init { force } => cmd_init(&cli, *force),
    }
}

fn cmd_show(cli: &Cli, json: bool) -> Result<()> {
    let config = resolve(cli)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&config).context("failed to serialize configuration")?;
        println!("{rendered}");
    } else {
        println!("project:   {}", config.project);
        println!("brain_db:  {}", config.brain_db.display());
        println!("root:      {}", config.root.display());
    }
    Ok(())
}

fn cmd_check(cli: &Cli) -> Result<()> {
    let config = resolve(cli)?;
    let report = run_checks(&config);

    for check in &report.checks {
        let tag = match check.status {
            CheckStatus::Ok => "ok",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "FAIL",
        };
        println!("{:<10} [{tag:<4}] {}", format!("{}:", check.name), check.detail);
    }

    if report.failed() {
        std::process::exit(1);
    }
    println!("all checks passed");
    Ok(())
}

fn cmd_init(cli: &Cli, force: bool) -> Result<()> {
    let config = resolve(cli)?;

    let path = overrides(cli)
        .layered_over(Overrides::from_env())
        .config_file
        .unwrap_or_else(default_config_file);
    tracing::debug!("config file target: {}", path.display());

    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let rendered = config.render_file().context("failed to render config file")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("wrote {}", path.display());
    Ok(())
}
