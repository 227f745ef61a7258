// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::columns::SourceFormat;
use crate::config::{self, AppOptions};
use crate::config::options::ExportOptions;
use crate::progress::Progress;
use crate::report;
use crate::runner::{self, RunSummary};
use crate::validate::ValidationMode;

#[derive(Parser, Debug)]
#[command(name = "oabq", version, about = "Normalize OAB / concurso question spreadsheets into JSON and TypeScript")]
pub struct Cli {
    /// key = value config file (default: ./oabq.conf if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only, no progress bar or summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a spreadsheet and write the question files
    Extract(ExtractArgs),
    /// Clean, renumber and re-validate an existing JSON export
    Reclean(RecleanArgs),
    /// Pick a category-diverse subset of a JSON export
    Sample(SampleArgs),
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// JSON output path (a trailing '/' means "in this directory")
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// TypeScript literal output path
    #[arg(long)]
    pub ts: Option<PathBuf>,

    /// Exported constant name
    #[arg(long)]
    pub const_name: Option<String>,

    /// Typed literal (Question import, no ids)
    #[arg(long)]
    pub typed: bool,

    /// Cut question text in the literal to N chars
    #[arg(long, value_name = "N")]
    pub truncate: Option<usize>,
}

impl OutputArgs {
    fn apply(&self, export: &mut ExportOptions) {
        if let Some(p) = &self.json {
            export.json_path = Some(crate::file::resolve_out_path(p, config::consts::DEFAULT_JSON_FILE));
        }
        if let Some(p) = &self.ts {
            export.ts_path = Some(crate::file::resolve_out_path(p, config::consts::DEFAULT_TS_FILE));
        }
        if let Some(n) = &self.const_name {
            export.literal.const_name = n.clone();
        }
        if self.typed {
            export.literal.typed = true;
        }
        if self.truncate.is_some() {
            export.literal.truncate_text = self.truncate;
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Spreadsheet (.xlsx/.xls/.ods/.csv/.tsv)
    pub input: Option<PathBuf>,

    /// auto | grouped | flat | positional
    #[arg(long)]
    pub format: Option<SourceFormat>,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Keep at most N accepted questions
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Exactly 4 non-empty options
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// At least 2 options
    #[arg(long)]
    pub lenient: bool,

    #[arg(long)]
    pub difficulty: Option<u8>,

    #[command(flatten)]
    pub out: OutputArgs,
}

impl ExtractArgs {
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(p) = &self.input {
            opts.input.path = p.clone();
        }
        if let Some(f) = self.format {
            opts.normalize.format = f;
        }
        if self.sheet.is_some() {
            opts.input.sheet = self.sheet.clone();
        }
        if self.limit.is_some() {
            opts.normalize.limit = self.limit;
        }
        if self.strict {
            opts.normalize.mode = Some(ValidationMode::Strict);
        } else if self.lenient {
            opts.normalize.mode = Some(ValidationMode::Lenient);
        }
        if let Some(d) = self.difficulty {
            opts.normalize.difficulty = d;
        }
        self.out.apply(&mut opts.export);
    }
}

#[derive(Args, Debug)]
pub struct RecleanArgs {
    /// JSON array of questions
    pub input: PathBuf,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// JSON array of questions
    pub input: PathBuf,

    /// Rough size of the sample
    #[arg(long)]
    pub target: Option<usize>,

    /// Lower bound per category
    #[arg(long)]
    pub min: Option<usize>,

    /// Upper bound per category
    #[arg(long)]
    pub max: Option<usize>,

    /// Leave out the non-majority exam tracks
    #[arg(long)]
    pub no_minority: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl SampleArgs {
    pub fn apply(&self, opts: &mut AppOptions) {
        let s = &mut opts.sample;
        if let Some(v) = self.target { s.target = v; }
        if let Some(v) = self.min { s.min_per_category = v; }
        if let Some(v) = self.max { s.max_per_category = v; }
        if self.no_minority { s.include_minority = false; }
        if let Some(p) = &self.out {
            s.out_path = crate::file::resolve_out_path(p, config::consts::DEFAULT_SAMPLE_FILE);
        }
    }
}

impl Cli {
    pub fn verbosity(&self) -> i8 {
        if self.quiet { -1 } else { self.verbose.min(i8::MAX as u8) as i8 }
    }
}

/* ---------------- progress bar ---------------- */

/// Terminal progress over `indicatif`; hidden in quiet mode.
pub struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    pub fn new(quiet: bool) -> Self {
        let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(0) };
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows {msg}") {
            pb.set_style(style);
        }
        Self { pb }
    }
}

impl Progress for BarProgress {
    fn begin(&mut self, total: usize) { self.pb.set_length(total as u64); }
    fn log(&mut self, msg: &str) { self.pb.set_message(s!(msg)); }
    fn item_done(&mut self) { self.pb.inc(1); }
    fn finish(&mut self) { self.pb.finish_and_clear(); }
}

/* ---------------- entry ---------------- */

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbosity());

    let mut opts = config::file::load(cli.config.as_deref())?;
    let mut progress = BarProgress::new(cli.quiet);

    let summary = match &cli.command {
        Command::Extract(args) => {
            args.apply(&mut opts);
            runner::extract(&opts, &mut progress)?
        }
        Command::Reclean(args) => {
            args.out.apply(&mut opts.export);
            runner::reclean(&args.input, &opts.export, &mut progress)?
        }
        Command::Sample(args) => {
            args.apply(&mut opts);
            runner::sample(&args.input, &opts.sample, &mut progress)?
        }
    };
    progress.finish();

    if !cli.quiet {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    print!("{}", summary.report);
    if let Some(plan) = &summary.sample {
        if let Some(majority) = plan.majority {
            println!(
                "Sample: {} categories of {} x {} each, {} other-track questions",
                plan.categories, majority, plan.per_category, plan.minority_records
            );
        }
    }
    if summary.records.is_empty() {
        return;
    }
    println!();
    print!("{}", summary.stats);
    println!();
    print!("{}", report::preview(&summary.records));
    for p in &summary.files_written {
        println!("Wrote {}", p.display());
    }
}
