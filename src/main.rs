// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use kp2imdb::app_config::{Config, Locale, LogLevel};
use kp2imdb::app_controller::Controller;
use kp2imdb::file_utils::FileManager;
use kp2imdb::models::ResolutionOutcome;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for Locale to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLocale {
    En,
    Ru,
}

impl From<CliLocale> for Locale {
    fn from(cli_locale: CliLocale) -> Self {
        match cli_locale {
            CliLocale::En => Locale::En,
            CliLocale::Ru => Locale::Ru,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rate every exported title on IMDb (default command)
    Sync(SyncArgs),

    /// Resolve a single title and print what would be rated
    Resolve {
        /// Localized title
        #[arg(short, long)]
        title: String,

        /// Original-language title
        #[arg(short, long, default_value = "")]
        original: String,

        /// Release year
        #[arg(short, long)]
        year: Option<u16>,
    },

    /// Write a configuration template
    Init,

    /// Generate shell completions for kp2imdb
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct SyncArgs {
    /// Exported ratings (JSON array)
    #[arg(short, long, default_value = "data.json")]
    input: PathBuf,

    /// File collecting titles that need attention
    #[arg(short, long, default_value = "warnings.json")]
    warnings: PathBuf,

    /// Resolve titles without submitting ratings
    #[arg(long)]
    dry_run: bool,
}

/// kp2imdb - move Kinopoisk ratings to IMDb
///
/// Resolves every exported title to an IMDb identifier through OMDb and
/// submits the rating with your IMDb session.
#[derive(Parser, Debug)]
#[command(name = "kp2imdb")]
#[command(version)]
#[command(about = "Transfer Kinopoisk ratings to IMDb")]
#[command(long_about = "kp2imdb resolves exported Kinopoisk titles through OMDb and rates them on IMDb.

EXAMPLES:
    kp2imdb                                    # Sync data.json using config.json
    kp2imdb sync -i ratings.json --dry-run     # Resolve only, rate nothing
    kp2imdb resolve -t 'Брат' -y 1997          # Resolve a single title
    kp2imdb --locale ru sync                   # Explain failures in Russian
    kp2imdb init                               # Write a config template
    kp2imdb completions bash > kp2imdb.bash    # Generate bash completions

CONFIGURATION:
    config.json must hold 'omdb_api_key' and 'imdb_cookie'. Titles that could
    not be rated, or were rated on an uncertain match, are appended to
    warnings.json with an explanation.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Language of failure explanations
    #[arg(long, global = true, value_enum)]
    locale: Option<CliLocale>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config tells otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.into());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "kp2imdb", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Init) => {
            Config::write_default(&cli.config_path)?;
            info!("Config template written to {:?}. Fill in 'omdb_api_key' and 'imdb_cookie'.", cli.config_path);
            Ok(())
        }
        Some(Commands::Resolve { ref title, ref original, year }) => {
            let controller = build_controller(&cli)?;
            let outcome = controller.resolve_one(title, original, year).await;
            print_outcome(&outcome);
            Ok(())
        }
        Some(Commands::Sync(ref args)) => run_sync(&cli, args).await,
        None => {
            let args = SyncArgs {
                input: PathBuf::from("data.json"),
                warnings: PathBuf::from("warnings.json"),
                dry_run: false,
            };
            run_sync(&cli, &args).await
        }
    }
}

// Load config, apply CLI overrides and build the controller
fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let mut config = Config::load(&cli.config_path)
        .with_context(|| format!("Reading config {:?} (run `kp2imdb init` to create one)", cli.config_path))?;

    if let Some(locale) = &cli.locale {
        config.locale = locale.clone().into();
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Controller::with_config(config)
}

async fn run_sync(cli: &CommandLineOptions, args: &SyncArgs) -> Result<()> {
    if !FileManager::file_exists(&args.input) {
        return Err(anyhow!("Input file does not exist: {:?}", args.input));
    }

    let controller = build_controller(cli)?;
    if args.dry_run {
        warn!("Dry run: ratings will not be submitted");
    }

    let summary = controller.run(&args.input, &args.warnings, args.dry_run).await?;
    if summary.uncertain + summary.failed > 0 {
        info!("Titles needing attention were written to {:?}", args.warnings);
    }

    Ok(())
}

fn print_outcome(outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::Resolved(found) => {
            println!("Resolved: {} ({})", found.matched_title, found.external_id);
        }
        ResolutionOutcome::ResolvedUncertain { found, searched_as, evidence_year } => {
            println!(
                "Uncertain: {} ({}), searched as '{}' ({})",
                found.matched_title,
                found.external_id,
                searched_as,
                evidence_year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
            );
        }
        ResolutionOutcome::NotFound => println!("Not found"),
        ResolutionOutcome::ServiceError(reason) => println!("Service error: {}", reason),
    }
}
