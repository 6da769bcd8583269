// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tlmerge::app_config::{self, Config};
use tlmerge::store::CouchbaseStore;
use tlmerge::{Controller, MergeOptions, MergeOutcome, Prompter};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for tlmerge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// A file which will be overwritten with the translation
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// A translation document id in the document store
    #[arg(short, long, value_name = "DOC")]
    doc: Option<String>,

    /// Read the translation document from a local JSON file instead of the store
    #[arg(long, value_name = "JSON")]
    doc_file: Option<PathBuf>,

    /// A regular expression to convert the document URI into a file path
    #[arg(long, value_name = "REGEX")]
    file_uri_regex: Option<String>,

    /// A replacement string to convert the document URI into a file path
    #[arg(long, value_name = "REPLACEMENT", requires = "file_uri_regex")]
    file_uri_replace: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Document store REST endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Bucket holding translation documents
    #[arg(long)]
    bucket: Option<String>,

    /// Document store user name
    #[arg(long, env = "TLMERGE_STORE_USERNAME")]
    username: Option<String>,

    /// Document store password
    #[arg(long, env = "TLMERGE_STORE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Language key of the original sentences (e.g., 'en')
    #[arg(long)]
    source_language: Option<String>,

    /// Language key of the translated sentences (e.g., 'ja')
    #[arg(long)]
    target_language: Option<String>,

    /// Merge every sentence and overwrite the file without asking
    #[arg(short, long)]
    yes: bool,
}

/// tlmerge - merge reviewed translations back into source files
#[derive(Parser, Debug)]
#[command(name = "tlmerge")]
#[command(version)]
#[command(about = "Merge reviewed translations back into source files")]
#[command(long_about = "tlmerge fetches a translation document, locates each original sentence in the
source file and replaces it with the reviewed translation, asking before each change.

EXAMPLES:
    tlmerge -d guide-intro -f docs/intro.md          # Merge a document into a file
    tlmerge -d guide-intro                           # Derive the file from the document URI
    tlmerge -d guide-intro --file-uri-regex '^https://example.com/(.*)$' --file-uri-replace 'site/$1'
    tlmerge --doc-file intro.json -f docs/intro.md   # Use a local record instead of the store
    tlmerge -y -d guide-intro -f docs/intro.md       # Accept every sentence
    tlmerge completions bash > tlmerge.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    merge: MergeArgs,
}

// @struct: Custom logger, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tlmerge", &mut std::io::stdout());
            Ok(())
        }
        None => run_merge(cli.merge).await,
    }
}

async fn run_merge(args: MergeArgs) -> Result<()> {
    if let Some(level) = &args.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&args.config_path)?;

    // Command line overrides
    if let Some(endpoint) = args.endpoint {
        config.store.endpoint = endpoint;
    }
    if let Some(bucket) = args.bucket {
        config.store.bucket = bucket;
    }
    if let Some(username) = args.username {
        config.store.username = username;
    }
    if let Some(password) = args.password {
        config.store.password = password;
    }
    if let Some(source_language) = args.source_language {
        config.source_language = source_language;
    }
    if let Some(target_language) = args.target_language {
        config.target_language = target_language;
    }

    if args.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    let store = CouchbaseStore::new(&controller.config().store)?;
    let mut prompter = Prompter::stdio().assume_yes(args.yes);

    let options = MergeOptions {
        file: args.file,
        doc: args.doc,
        doc_file: args.doc_file,
        file_uri_regex: args.file_uri_regex,
        file_uri_replace: args.file_uri_replace,
    };

    if let MergeOutcome::Completed(report) = controller.run(options, &store, &mut prompter).await? {
        info!(
            "Merged {}/{} sentences into {:?}{}",
            report.merged,
            report.planned,
            report.file,
            if report.written { "" } else { " (not written)" }
        );
    }

    Ok(())
}
