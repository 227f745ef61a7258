// src/reclean.rs
//
// Second pass over an already exported JSON set: older exports still carry
// HTML and entities, ids from different sheets collide, and some lack an
// explanation. Everything is cleaned again, renumbered by position and held
// to the strict rule.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::consts::{DEFAULT_CATEGORY, DEFAULT_DIFFICULTY};
use crate::core::clean_text;
use crate::error::{Error, Result};
use crate::normalize::Normalized;
use crate::question::{ChallengeType, QuestionRecord};
use crate::report::{RowError, RunReport};
use crate::validate::{self, ValidationMode};

fn default_difficulty() -> u8 { DEFAULT_DIFFICULTY }
fn default_category() -> String { s!(DEFAULT_CATEGORY) }

/// A record as found in the wild: only `text` and `options` are required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LooseRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer_index: usize,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub challenge_type: ChallengeType,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl LooseRecord {
    /// Clean every text field and give it the id for input position `pos` (1-based).
    pub fn into_record(self, pos: usize) -> QuestionRecord {
        let id = format!("Q{pos:04}");
        let explanation = self
            .explanation
            .map(|e| clean_text(&e))
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("Questão {id}"));
        QuestionRecord {
            text: clean_text(&self.text),
            options: self.options.iter().map(|o| clean_text(o)).collect(),
            correct_answer_index: self.correct_answer_index,
            difficulty: self.difficulty,
            category: clean_text(&self.category),
            challenge_type: self.challenge_type,
            explanation,
            id,
        }
    }
}

/// Parse a JSON array leniently: one bad element skips that element only.
pub fn parse_loose(text: &str, report: &mut RunReport) -> Result<Vec<(usize, LooseRecord)>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(text)?;
    report.rows_seen = values.len();
    let mut out = Vec::with_capacity(values.len());
    for (i, v) in values.into_iter().enumerate() {
        let pos = i + 1;
        match serde_json::from_value::<LooseRecord>(v) {
            Ok(r) => out.push((pos, r)),
            Err(e) => report.skip(pos, RowError::Malformed(e.to_string())),
        }
    }
    Ok(out)
}

/// Re-clean, renumber and strictly re-validate.
pub fn reclean_str(text: &str) -> Result<Normalized> {
    let mut report = RunReport { mode: Some(ValidationMode::Strict), ..Default::default() };
    let loose = parse_loose(text, &mut report)?;
    report.drafts = loose.len();

    let mut records = Vec::with_capacity(loose.len());
    for (pos, l) in loose {
        let r = l.into_record(pos);
        match validate::check(&r, ValidationMode::Strict) {
            Ok(()) => records.push(r),
            Err(why) => report.reject(&r.id, why),
        }
    }
    report.accepted = records.len();
    logf!("reclean: {} of {} records kept", records.len(), report.rows_seen);
    Ok(Normalized { records, report })
}

pub fn reclean_path(path: &Path) -> Result<Normalized> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    reclean_str(&text)
}
