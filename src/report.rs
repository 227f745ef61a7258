// src/report.rs
//
// Everything a run wants to tell the user, collected as values and printed
// once at the end: skipped rows (with their sheet line), rejected records,
// answers that fell back to option A, and per-category / per-track counts.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;

use crate::columns::{Role, SourceFormat};
use crate::config::consts::{PREVIEW_COUNT, PREVIEW_TEXT_CHARS};
use crate::core::sanitize::truncate_chars;
use crate::question::{ChallengeType, QuestionRecord};
use crate::validate::{Rejection, ValidationMode};

/// How many individual skipped rows / rejections to list before summarizing.
const DETAIL_LINES: usize = 10;

/// Why one source row contributed nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing {0}")]
    MissingField(Role),
    #[error("option letter {0:?} is not A-D")]
    BadLetter(String),
    #[error("option {0} given twice for this question")]
    DuplicateLetter(char),
    #[error("correct flag {0:?} is not a yes/no value")]
    BadFlag(String),
    #[error("option {text:?} too short ({chars} chars)")]
    ShortOption { text: String, chars: usize },
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl RowError {
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::MissingField(_) => "missing field",
            RowError::BadLetter(_) => "bad letter",
            RowError::DuplicateLetter(_) => "duplicate letter",
            RowError::BadFlag(_) => "bad correct flag",
            RowError::ShortOption { .. } => "short option",
            RowError::Malformed(_) => "malformed record",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based sheet line (header = 1), or array position for JSON input.
    pub line: usize,
    pub error: RowError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: Rejection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub format: Option<SourceFormat>,
    pub mode: Option<ValidationMode>,
    pub rows_seen: usize,
    pub skipped: Vec<SkippedRow>,
    pub drafts: usize,
    pub rejected: Vec<RejectedRecord>,
    pub accepted: usize,
    /// Accepted but cut by the output limit.
    pub capped: usize,
    /// Ids whose correct answer was not marked in the source and fell back to index 0.
    pub defaulted_answers: Vec<String>,
    /// Set when the source could not be read; the run produced nothing.
    pub source_error: Option<String>,
}

impl RunReport {
    pub fn skip(&mut self, line: usize, error: RowError) {
        logd!("line {}: skipped: {}", line, error);
        self.skipped.push(SkippedRow { line, error });
    }

    pub fn reject(&mut self, id: &str, reason: Rejection) {
        logd!("question {}: rejected: {}", id, reason);
        self.rejected.push(RejectedRecord { id: s!(id), reason });
    }

    pub fn skips_by_kind(&self) -> Vec<(&'static str, usize)> {
        count_desc(self.skipped.iter().map(|s| s.error.kind()))
    }

    pub fn rejections_by_kind(&self) -> Vec<(&'static str, usize)> {
        count_desc(self.rejected.iter().map(|r| r.reason.kind()))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.source_error {
            return writeln!(f, "Source could not be read: {err}");
        }
        if let Some(fmt_) = self.format {
            write!(f, "Format: {fmt_}")?;
            if let Some(mode) = self.mode {
                write!(f, " ({mode:?})")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Rows read:          {}", self.rows_seen)?;
        writeln!(f, "Rows skipped:       {}", self.skipped.len())?;
        for (kind, n) in self.skips_by_kind() {
            writeln!(f, "  {kind}: {n}")?;
        }
        for s in self.skipped.iter().take(DETAIL_LINES) {
            writeln!(f, "  line {}: {}", s.line, s.error)?;
        }
        if self.skipped.len() > DETAIL_LINES {
            writeln!(f, "  … {} more", self.skipped.len() - DETAIL_LINES)?;
        }
        writeln!(f, "Questions built:    {}", self.drafts)?;
        writeln!(f, "Questions rejected: {}", self.rejected.len())?;
        for (kind, n) in self.rejections_by_kind() {
            writeln!(f, "  {kind}: {n}")?;
        }
        writeln!(f, "Questions accepted: {}", self.accepted)?;
        if self.capped > 0 {
            writeln!(f, "Dropped by limit:   {}", self.capped)?;
        }
        if !self.defaulted_answers.is_empty() {
            writeln!(
                f,
                "WARNING: {} question(s) had no correct-answer marker and default to option A",
                self.defaulted_answers.len()
            )?;
            let ids: Vec<&str> = self.defaulted_answers.iter().take(DETAIL_LINES).map(String::as_str).collect();
            writeln!(f, "  e.g. {}", ids.join(", "))?;
        }
        Ok(())
    }
}

/* ---------------- statistics ---------------- */

/// Counts in descending order; ties keep first-seen order.
fn count_desc<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut ix: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, usize)> = Vec::new();
    for k in items {
        match ix.get(&k) {
            Some(&i) => out[i].1 += 1,
            None => {
                ix.insert(k.clone(), out.len());
                out.push((k, 1));
            }
        }
    }
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub by_category: Vec<(String, usize)>,
    pub by_challenge: Vec<(ChallengeType, usize)>,
}

impl Stats {
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        Self {
            total: records.len(),
            by_category: count_desc(records.iter().map(|r| r.category.clone())),
            by_challenge: count_desc(records.iter().map(|r| r.challenge_type)),
        }
    }

    pub fn count_for(&self, challenge: ChallengeType) -> usize {
        self.by_challenge.iter().find(|(c, _)| *c == challenge).map_or(0, |(_, n)| *n)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {} questions", self.total)?;
        writeln!(f, "By challenge type:")?;
        for (c, n) in &self.by_challenge {
            writeln!(f, "  {c}: {n}")?;
        }
        writeln!(f, "By category:")?;
        for (c, n) in &self.by_category {
            writeln!(f, "  {c}: {n}")?;
        }
        Ok(())
    }
}

/// Short human preview of the first few records.
pub fn preview(records: &[QuestionRecord]) -> String {
    let mut out = s!();
    for (i, q) in records.iter().take(PREVIEW_COUNT).enumerate() {
        out.push_str(&format!(
            "{}. [{}] {} ({})\n   {}\n   options: {}, correct: {}\n",
            i + 1,
            q.id,
            q.category,
            q.challenge_type,
            truncate_chars(&q.text, PREVIEW_TEXT_CHARS),
            q.options.len(),
            crate::columns::letter_for(q.correct_answer_index),
        ));
    }
    out
}
