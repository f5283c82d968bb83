use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use settings_codemod::{
    codemods::{api_client, cookie_helper, Registry},
    commands::{self, RunOptions},
    config::ConfigLoader,
    diff::MatchPolicy,
};

#[derive(Parser)]
#[command(
    name = "settings-codemod",
    version,
    about = "Rewrite the admin Settings page to use the shared API client"
)]
struct Cli {
    /// Target file (default Settings.js in the working directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fail when a rule matches nothing
    #[arg(long, global = true)]
    strict: bool,

    /// Print a unified diff instead of writing the file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Route raw fetch calls through the shared API client
    ApiClient,
    /// Remove the cookie helper and its call sites
    CookieHelper,
    /// Run api-client then cookie-helper
    All,
    /// Run a rule set by name, built-in or from the config file
    Run {
        /// Rule set name
        name: String,
    },
    /// Print every rule set and its rules
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    settings_codemod::init_with_logger(cli.verbose)?;

    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    if let Some(path) = loader.config_path() {
        info!("Using config file {}", path.display());
    }
    let config = loader.load().context("Failed to load configuration")?;
    let registry = Registry::from_config(&config).context("Failed to compile rule sets")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let selected = match cli.command.unwrap_or(Commands::All) {
        Commands::List => {
            let all: Vec<_> = registry.iter().collect();
            return commands::list(&all, &mut out);
        }
        Commands::ApiClient => vec![registry.get(api_client::NAME)?],
        Commands::CookieHelper => vec![registry.get(cookie_helper::NAME)?],
        Commands::All => registry.builtin_sequence()?,
        Commands::Run { name } => vec![registry.get(&name)?],
    };

    let policy = if cli.strict {
        MatchPolicy::Strict
    } else {
        config.match_policy()
    };
    let options = RunOptions {
        target: cli.file.unwrap_or(config.target),
        policy,
        dry_run: cli.dry_run,
    };

    info!(
        "settings-codemod v{} targeting {}",
        settings_codemod::version(),
        options.target.display()
    );

    commands::execute(&selected, &options, &mut out)?;
    out.flush()?;

    Ok(())
}
