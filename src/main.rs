//! CLI entry point for `mail2html`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mail2html::config::Config;
use mail2html::export::html::{convert_directory, BulkOptions};

#[derive(Parser)]
#[command(name = "mail2html", version, about = "Convert e-mail sources into HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single message file and print the result
    Convert {
        /// Path of the message file
        #[arg(long)]
        file_path: PathBuf,
    },
    /// Convert every message in a directory into HTML files
    #[command(alias = "bulkconvert")]
    BulkConvert {
        /// Directory holding the message files [default: ./original_files]
        #[arg(long)]
        original_dir: Option<PathBuf>,
        /// Directory receiving the HTML files [default: ./output]
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Continue with the next file when one fails
        #[arg(long)]
        keep_going: bool,
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

    let config = mail2html::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Convert { file_path } => cmd_convert(&file_path),
        Commands::BulkConvert {
            original_dir,
            output_dir,
            keep_going,
        } => {
            let original_dir = original_dir.unwrap_or_else(|| config.convert.original_dir.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.convert.output_dir.clone());
            let options = BulkOptions {
                keep_going: keep_going || config.convert.keep_going,
            };
            cmd_bulk_convert(&original_dir, &output_dir, &options)
        }
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

    let log_dir = mail2html::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mail2html.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Convert one message and echo the resulting mapping.
fn cmd_convert(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("The file({}) does not exist", path.display());
    }

    let message = mail2html::convert_file(path)?;
    println!("[Info] {}", serde_json::to_string(&message)?);
    println!("[Info] Done!");
    Ok(())
}

/// Convert a whole directory, writing `.plain.html` / `.html.html` files.
fn cmd_bulk_convert(
    original_dir: &Path,
    output_dir: &Path,
    options: &BulkOptions,
) -> anyhow::Result<()> {
    if !original_dir.is_dir() {
        anyhow::bail!("The directory({}) does not exist", original_dir.display());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let stats = convert_directory(original_dir, output_dir, options, &|current, total| {
        pb.set_length(total as u64);
        pb.set_position(current as u64);
    })?;
    pb.finish_and_clear();

    use humansize::{format_size, BINARY};
    println!();
    println!("  {:<20} {}", "Messages converted", stats.converted);
    if stats.failed > 0 {
        println!("  {:<20} {}", "Messages failed", stats.failed);
    }
    println!("  {:<20} {}", "Files written", stats.written.len());
    println!("  {:<20} {}", "Output size", format_size(stats.bytes_written, BINARY));
    println!("  {:<20} {}", "Output directory", output_dir.display());
    println!("  {:<20} {:.2?}", "Elapsed", start.elapsed());
    println!();
    println!("[Info] Done!");

    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mail2html", &mut std::io::stdout());
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
