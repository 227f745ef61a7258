// src/runner.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{
    classify::Classifier,
    config::AppOptions,
    config::options::{ExportOptions, SampleOptions},
    error::{Error, Result},
    export::{self, json},
    file::write_with,
    normalize::{Normalized, Normalizer},
    progress::Progress,
    question::QuestionRecord,
    reclean,
    report::{RunReport, Stats},
    sample::{self, SamplePlan},
    source,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<QuestionRecord>,
    pub report: RunReport,
    pub stats: Stats,
    pub sample: Option<SamplePlan>,
    pub files_written: Vec<PathBuf>,
}

impl RunSummary {
    fn from_normalized(n: Normalized) -> Self {
        let stats = Stats::from_records(&n.records);
        Self { records: n.records, report: n.report, stats, ..Default::default() }
    }

    /// A run whose input could not be read: logged, nothing produced.
    fn source_failure(what: &Path, err: Error) -> Self {
        loge!("cannot read {}: {}", what.display(), err);
        let report = RunReport { source_error: Some(err.to_string()), ..Default::default() };
        Self { report, ..Default::default() }
    }
}

/* ---------------- extract ---------------- */

/// Sheet → records → JSON + literal.
///
/// Source problems (unreadable file, unusable header) end the run with an
/// empty summary rather than an error; only output failures are errors.
pub fn extract(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    extract_with(opts, &Classifier::default(), progress)
}

pub fn extract_with(opts: &AppOptions, classifier: &Classifier, progress: &mut dyn Progress) -> Result<RunSummary> {
    let path = &opts.input.path;
    progress.log(&format!("Reading {}", path.display()));

    let normalized = match source::read_sheet(path, opts.input.sheet.as_deref()) {
        Ok(sheet) => Normalizer::new(&opts.normalize, classifier).run(&sheet, progress),
        Err(e) => Err(e),
    };
    let normalized = match normalized {
        Ok(n) => n,
        Err(e) => {
            progress.finish();
            return Ok(RunSummary::source_failure(path, e));
        }
    };

    let mut summary = RunSummary::from_normalized(normalized);
    if summary.records.is_empty() {
        logw!("no valid questions in {}", path.display());
        return Ok(summary);
    }
    summary.files_written = export::write_outputs(&summary.records, &opts.export)?;
    Ok(summary)
}

/* ---------------- reclean ---------------- */

pub fn reclean(input: &Path, export_opts: &ExportOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    progress.log(&format!("Re-cleaning {}", input.display()));
    let normalized = match reclean::reclean_path(input) {
        Ok(n) => n,
        Err(e) => return Ok(RunSummary::source_failure(input, e)),
    };
    let mut summary = RunSummary::from_normalized(normalized);
    if !summary.records.is_empty() {
        summary.files_written = export::write_outputs(&summary.records, export_opts)?;
    }
    Ok(summary)
}

/* ---------------- sample ---------------- */

pub fn sample(input: &Path, opts: &SampleOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    progress.log(&format!("Sampling {}", input.display()));
    let all = match json::read_records(input) {
        Ok(rs) => rs,
        Err(e) => return Ok(RunSummary::source_failure(input, e)),
    };

    let (picked, plan) = sample::diverse_sample(&all, opts);
    let mut report = RunReport { rows_seen: all.len(), accepted: picked.len(), ..Default::default() };
    report.drafts = all.len();

    let mut summary = RunSummary {
        stats: Stats::from_records(&picked),
        records: picked,
        report,
        sample: Some(plan),
        files_written: vec![],
    };
    if !summary.records.is_empty() {
        let body = json::to_json_string(&summary.records)?;
        summary.files_written.push(write_with(&opts.out_path, |w| w.write_all(body.as_bytes()))?);
    }
    Ok(summary)
}
