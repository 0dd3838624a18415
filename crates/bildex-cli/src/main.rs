use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

use bildex_core::config_file::{self, ConfigFile};
use bildex_parsing::{ArticleExtractor, ParsingConfig};
use bildex_pdf_mupdf::MupdfProvider;
use bildex_reporting::{ExportFormat, RunSummary};

/// Bilingual Proceedings Extractor - pull titles, abstracts, and keywords out of proceedings PDFs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract article records from a proceedings PDF or a directory of PDFs
    Extract {
        /// Path to a PDF file or a directory containing PDFs
        input: PathBuf,

        /// Year label written into every record (e.g. "2021-2022")
        #[arg(short, long)]
        year: String,

        /// Write all records into this single file (default: one file per PDF,
        /// next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv or jsonl
        #[arg(long, default_value = "csv")]
        format: String,

        /// Path to a TOML config file (default: platform config overlaid by ./.bildex.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print summary statistics for a previously produced CSV
    Summarize {
        /// Path to a CSV produced by the extract command
        csv: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            input,
            year,
            output,
            format,
            config,
            no_color,
        } => extract(input, year, output, format, config, no_color),
        Command::Summarize { csv, no_color } => summarize(csv, no_color),
    }
}

fn extract(
    input: PathBuf,
    year: String,
    output: Option<PathBuf>,
    format: String,
    config: Option<PathBuf>,
    no_color: bool,
) -> anyhow::Result<()> {
    let format: ExportFormat = format.parse()?;
    let color = ColorMode(!no_color);
    let mut stdout = std::io::stdout();

    let file_config = match config {
        Some(path) => config_file::load_from_path(&path)
            .ok_or_else(|| anyhow::anyhow!("cannot read config file: {}", path.display()))?,
        None => config_file::load_config(),
    };
    let extractor = build_extractor(&file_config)?;

    let pdfs = collect_inputs(&input)?;
    if pdfs.is_empty() {
        anyhow::bail!("no PDF files found under {}", input.display());
    }

    let bar = ProgressBar::new(pdfs.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:30} {pos}/{len} {msg}",
    )?);

    let mut all_records = Vec::new();

    for pdf in &pdfs {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| pdf.display().to_string());
        bar.set_message(name.clone());

        // A document that cannot be opened is fatal for that document only;
        // the batch continues with the next one.
        let provider = match MupdfProvider::open(pdf) {
            Ok(p) => p,
            Err(e) => {
                bar.suspend(|| output::print_document_error(&mut stdout, &name, &e, color))?;
                bar.inc(1);
                continue;
            }
        };

        let outcome = extractor.extract(&provider, &year);
        bar.suspend(|| output::print_document_result(&mut stdout, &name, &outcome.stats, color))?;

        if output.is_none() && !outcome.records.is_empty() {
            let path = pdf.with_extension(format.extension());
            bildex_reporting::write_records(&outcome.records, format, &path)?;
        }
        all_records.extend(outcome.records);
        bar.inc(1);
    }
    bar.finish_and_clear();

    if let Some(path) = output {
        bildex_reporting::write_records(&all_records, format, &path)?;
        println!("wrote {} record(s) to {}", all_records.len(), path.display());
    }

    let summary = RunSummary::from_records(&all_records);
    output::print_summary(&mut stdout, &summary, color)?;
    Ok(())
}

fn summarize(csv: PathBuf, no_color: bool) -> anyhow::Result<()> {
    let records = bildex_reporting::read_csv(&csv)?;
    let summary = RunSummary::from_records(&records);
    output::print_summary(&mut std::io::stdout(), &summary, ColorMode(!no_color))?;
    Ok(())
}

fn build_extractor(file_config: &ConfigFile) -> anyhow::Result<ArticleExtractor> {
    let parsing = ParsingConfig::from_config_file(file_config);
    Ok(ArticleExtractor::with_config(parsing)?)
}

/// A single PDF path, or every `*.pdf` directly inside a directory, sorted.
fn collect_inputs(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut pdfs: Vec<PathBuf> = std::fs::read_dir(input)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|e| e.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
            })
            .collect();
        pdfs.sort();
        return Ok(pdfs);
    }
    if input.exists() {
        return Ok(vec![input.to_path_buf()]);
    }
    anyhow::bail!("input not found: {}", input.display())
}
