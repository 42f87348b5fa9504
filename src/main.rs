//! CLI entry point for `threadmedia`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};

use threadmedia::config::Config;
use threadmedia::export::{self, ExportFormat};
use threadmedia::extract::{self, url::ApiRoot};
use threadmedia::model::attachment::Attachment;
use threadmedia::parser::thread::load_thread;
use threadmedia::stats::{thread_stats, ThreadStats};
use threadmedia::thread::DefaultThreadPolicy;

/// Extract the media carousel (images and videos) of a chat thread.
#[derive(Parser)]
#[command(name = "threadmedia", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API root that media URLs resolve against (overrides config)
    #[arg(long, value_name = "URL", global = true, env = "THREADMEDIA_API_ROOT")]
    api_root: Option<String>,

    /// Account ID of the signed-in user, for whisper visibility (overrides config)
    #[arg(long, value_name = "ID", global = true)]
    account_id: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the attachments of a thread, oldest first
    Extract {
        /// Thread JSON document
        path: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Write the list to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export format for --output: json or csv
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Show thread statistics
    Stats {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration, or write it with --init
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = threadmedia::config::load_config();
    if let Some(root) = cli.api_root.clone() {
        config.api.root_url = root;
    }
    if let Some(id) = cli.account_id {
        config.session.current_account_id = Some(id);
    }

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Extract {
            path,
            json,
            output,
            format,
        } => cmd_extract(&path, json, output.as_deref(), &format, &config),
        Commands::Stats { path, json } => cmd_stats(&path, json, &config),
        Commands::Config { init } => cmd_config(init, &config),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = threadmedia::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "threadmedia.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        tracing::debug!(
            log_file = %threadmedia::config::log_file_path(config).display(),
            "File logging enabled"
        );
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Print the effective configuration as TOML, or save it.
fn cmd_config(init: bool, config: &Config) -> anyhow::Result<()> {
    if init {
        threadmedia::config::save_config(config)?;
        if let Some(path) = threadmedia::config::config_file_path() {
            println!("  Wrote {}", path.display());
        }
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "threadmedia", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Extract and print (or export) the attachments of a thread.
fn cmd_extract(
    path: &Path,
    json: bool,
    output: Option<&Path>,
    format: &str,
    config: &Config,
) -> anyhow::Result<()> {
    let thread = load_thread(path)?;
    let resolver = ApiRoot::from_config(&config.api)?;
    let policy = DefaultThreadPolicy::new(config.session.current_account_id);
    tracing::debug!(api_root = resolver.root(), "Resolving media URLs");

    let start = Instant::now();
    let attachments = extract::extract_thread(&thread, &policy, &resolver)?;
    tracing::info!(
        path = %path.display(),
        attachments = attachments.len(),
        elapsed = ?start.elapsed(),
        "Extraction finished"
    );

    if let Some(output) = output {
        let format: ExportFormat = format.parse()?;
        export::export(&attachments, format, output)?;
        println!(
            "  Exported {} attachment(s) to {}",
            attachments.len(),
            output.display()
        );
    } else if json {
        println!("{}", serde_json::to_string_pretty(&attachments)?);
    } else {
        print_attachments_table(&attachments);
    }

    Ok(())
}

/// Show statistics for a thread.
fn cmd_stats(path: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let thread = load_thread(path)?;
    let resolver = ApiRoot::from_config(&config.api)?;
    let policy = DefaultThreadPolicy::new(config.session.current_account_id);

    let attachments = extract::extract_thread(&thread, &policy, &resolver)?;
    let stats = thread_stats(&thread, &attachments, &policy)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats_table(path, &stats);
    }

    Ok(())
}

/// Print attachments as a human-readable table.
fn print_attachments_table(attachments: &[Attachment]) {
    println!();
    println!("  {} attachment(s)", attachments.len());
    println!();

    if attachments.is_empty() {
        return;
    }

    println!(
        "  {:<4} {:<6} {:<30} {:<5} {:<5} {:>8}  {}",
        "#", "Kind", "Name", "Auth", "Flag", "Duration", "Source"
    );
    println!("  {}", "-".repeat(98));

    for (i, att) in attachments.iter().enumerate() {
        let name: String = att.file.name.chars().take(29).collect();
        let duration = match att.duration {
            Some(d) if d.is_finite() => format!("{d:.1}s"),
            Some(_) => "?".to_string(),
            None => String::new(),
        };
        println!(
            "  {:<4} {:<6} {:<30} {:<5} {:<5} {:>8}  {}",
            i + 1,
            att.kind.as_str(),
            name,
            if att.is_auth_token_required { "yes" } else { "no" },
            if att.has_been_flagged { "yes" } else { "no" },
            duration,
            att.source
        );
    }
    println!();
}

/// Print statistics in a human-readable table.
fn print_stats_table(path: &Path, stats: &ThreadStats) {
    println!();
    println!("  {:<20} {}", "File", path.display());
    println!("  {:<20} {}", "Actions", stats.actions);
    println!("  {:<20} {}", "Visible actions", stats.visible_actions);
    println!("  {:<20} {}", "Money requests", stats.money_requests);
    println!("  {:<20} {}", "Attachments", stats.attachments);
    println!("  {:<20} {}", "  Images", stats.images);
    println!("  {:<20} {}", "  Videos", stats.videos);
    println!("  {:<20} {}", "Flagged", stats.flagged);
    println!();
}
