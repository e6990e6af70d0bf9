use anyhow::{ensure, Context, Result};
use clap::Parser;
use colored::Colorize;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use reclaim::{delete_all, scan, Registry, SizeAccountant};
use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    disable_version_flag = true,
    about = "Find and delete regenerable build and dependency directories to reclaim disk space",
    long_about = None
)]
struct Args {
    /// Directory to scan (defaults to the current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Scan and report only; delete nothing
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Delete without asking for confirmation
    #[arg(long, short = 'y')]
    yes: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read confirmation")?;

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    ensure!(
        args.path.is_dir(),
        "{} is not a directory",
        args.path.display()
    );
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", args.path.display()))?;

    let registry = Registry::load()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message(format!("Scanning {}...", root.display()));
    let mut records = scan(&root, &registry);

    spinner.set_message("Computing sizes...");
    SizeAccountant::default().annotate(&mut records);
    spinner.finish_and_clear();

    if records.is_empty() {
        println!("No removable build artifacts found.");
        return Ok(());
    }

    records.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

    for record in &records {
        println!(
            "{:>10}  {}",
            format_size(record.size_bytes, BINARY).cyan(),
            record.path.display()
        );
    }

    let total: u64 = records.iter().map(|r| r.size_bytes).sum();
    println!();
    println!(
        "{} directories, {} reclaimable",
        records.len(),
        format_size(total, BINARY).bold()
    );

    if args.dry_run {
        println!("Dry run: nothing was deleted.");
        return Ok(());
    }

    if !args.yes
        && !confirm(&format!(
            "Delete {} directories ({})?",
            records.len(),
            format_size(total, BINARY)
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    let report = delete_all(&records);

    println!(
        "Freed {}",
        format_size(report.freed_bytes, BINARY).green().bold()
    );
    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "Failed to remove".red(),
            failure.path.display(),
            failure.reason
        );
    }
    if !report.failures.is_empty() {
        println!(
            "{} of {} directories could not be removed",
            report.failures.len(),
            records.len()
        );
    }

    Ok(())
}
