//! process_pdfs - write a title/outline JSON file for every PDF in a directory

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{
    ClassifyOptions, ErrorMode, ExtractOptions, JsonFormat, Pipeline, PipelineEvent,
    PipelineOptions, RunSummary,
};

#[derive(Parser)]
#[command(name = "process_pdfs")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract titles and heading outlines from PDFs as JSON", long_about = None)]
struct Cli {
    /// Directory containing the PDFs to process
    #[arg(long, value_name = "DIR")]
    input: PathBuf,

    /// Directory for the JSON results (created if missing)
    #[arg(long, value_name = "DIR")]
    output: PathBuf,

    /// Number of heading levels to emit
    #[arg(long, env = "PDFOUTLINE_MAX_LEVELS", default_value = "3",
          value_parser = clap::value_parser!(u8).range(1..=6))]
    max_levels: u8,

    /// Language code used when detection fails
    #[arg(long, env = "PDFOUTLINE_FALLBACK_LANG", default_value = "en")]
    fallback_language: String,

    /// Only read the first N pages of each PDF
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Fail a file on the first unreadable page instead of skipping the page
    #[arg(long)]
    strict: bool,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        let mut extract = ExtractOptions::new().with_error_mode(if self.strict {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        });
        if let Some(pages) = self.max_pages {
            extract = extract.with_max_pages(pages);
        }

        PipelineOptions::new()
            .with_extract(extract)
            .with_classify(ClassifyOptions::new().with_max_levels(self.max_levels))
            .with_fallback_language(self.fallback_language.clone())
            .with_json_format(if self.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            })
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.pipeline_options();
    log::debug!("Pipeline options: {:?}", options);
    let pipeline = Pipeline::new(options);

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = pipeline.run_with_progress(&cli.input, &cli.output, |event| match event {
        PipelineEvent::Started { total } => pb.set_length(total as u64),
        PipelineEvent::FileDone { path, .. } => {
            pb.set_message(file_name(path));
            pb.inc(1);
        }
        PipelineEvent::FileFailed { path, error } => {
            pb.println(format!(
                "{} {}: {}",
                "skipped".yellow(),
                file_name(path),
                error
            ));
            pb.inc(1);
        }
    })?;

    pb.finish_and_clear();
    print_summary(&summary, &cli.output);
    Ok(())
}

fn print_summary(summary: &RunSummary, output: &Path) {
    if summary.total() == 0 {
        println!("{}", "No PDF files found.".yellow());
        return;
    }

    println!(
        "{} {} of {} PDFs -> {}",
        "Processed".green().bold(),
        summary.processed(),
        summary.total(),
        output.display()
    );

    if !summary.is_clean() {
        println!("{}", "Failed:".red().bold());
        let last = summary.failures.len() - 1;
        for (i, failure) in summary.failures.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!(
                "  {} {}: {}",
                branch.dimmed(),
                file_name(&failure.path),
                failure.message
            );
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
