// src/normalize/mod.rs
//! # Question normalizer
//!
//! Sheet rows in, validated records out. Each source format has its own row
//! scanner (`grouped`, `flat`, `positional`) that only knows how to turn rows
//! into [`Draft`]s. Everything after that is shared and lives here:
//!
//! 1. **finalize** – id, defaults, explanation placeholder, classification;
//! 2. **validate** – strict / lenient acceptance, duplicate ids dropped;
//! 3. **cap** – optional limit, encounter order kept.
//!
//! Row-level problems never abort a run; they land in the [`RunReport`].

mod flat;
mod grouped;
mod positional;

use std::collections::{HashMap, HashSet};

use crate::classify::Classifier;
use crate::columns::{ColumnMap, Role, SourceFormat};
use crate::config::options::NormalizeOptions;
use crate::core::clean_text;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::question::{ChallengeType, QuestionRecord};
use crate::report::{RowError, RunReport};
use crate::source::{Row, Sheet};
use crate::validate::{self, Rejection};

/// Output of one normalization run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    pub records: Vec<QuestionRecord>,
    pub report: RunReport,
}

/* ---------------- drafts ---------------- */

/// A question under construction. Question-level fields come from the first
/// row that created it; later rows only add options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub key: Option<String>,
    /// Sheet line that created the draft.
    pub line: usize,
    pub text: String,
    pub course: Option<String>,
    pub explanation: Option<String>,
    /// Option slots; `None` is a letter slot nobody filled.
    pub slots: Vec<Option<String>>,
    pub correct: Option<usize>,
    /// Explicit challenge-type cell; beats the classifier.
    pub challenge: Option<ChallengeType>,
}

impl Draft {
    pub fn new(line: usize) -> Self {
        Self { line, ..Default::default() }
    }

    /// Place an option at `slot` (letter-derived) or append it. Returns the
    /// index it ended up at, or `None` when the slot already holds an option
    /// (the first text stays).
    pub fn put_option(&mut self, slot: Option<usize>, text: String) -> Option<usize> {
        match slot {
            None => {
                self.slots.push(Some(text));
                Some(self.slots.len() - 1)
            }
            Some(ix) => {
                if self.slots.len() <= ix {
                    self.slots.resize(ix + 1, None);
                }
                if self.slots[ix].is_some() {
                    return None;
                }
                self.slots[ix] = Some(text);
                Some(ix)
            }
        }
    }

    /// First correct marker wins.
    pub fn mark_correct(&mut self, ix: usize) {
        if self.correct.is_none() {
            self.correct = Some(ix);
        }
    }
}

/// Drafts in first-encounter order of their key.
#[derive(Debug, Default)]
pub struct Drafts {
    list: Vec<Draft>,
    by_key: HashMap<String, usize>,
}

impl Drafts {
    /// Draft for `key`, created (and initialized by `init`) on first sight.
    pub fn entry_with(&mut self, key: &str, init: impl FnOnce() -> Draft) -> &mut Draft {
        let ix = match self.by_key.get(key).copied() {
            Some(ix) => ix,
            None => {
                let mut d = init();
                d.key = Some(s!(key));
                self.by_key.insert(s!(key), self.list.len());
                self.list.push(d);
                self.list.len() - 1
            }
        };
        &mut self.list[ix]
    }

    /// Keyless draft (one row, one question).
    pub fn push(&mut self, draft: Draft) {
        self.list.push(draft);
    }

    pub fn len(&self) -> usize { self.list.len() }
    pub fn is_empty(&self) -> bool { self.list.is_empty() }

    pub fn into_vec(self) -> Vec<Draft> { self.list }
}

/* ---------------- row helpers shared by the scanners ---------------- */

/// Yes/no cell → bool. Anything unrecognized is a row failure.
pub fn parse_flag(raw: &str) -> std::result::Result<bool, RowError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "1.0" | "true" | "sim" | "s" | "x" | "yes" | "y" | "verdadeiro" => Ok(true),
        "" | "0" | "0.0" | "false" | "não" | "nao" | "n" | "no" | "falso" => Ok(false),
        _ => Err(RowError::BadFlag(s!(raw.trim()))),
    }
}

/// Raw option cell → (cleaned text, carried a correct marker).
pub fn option_text(raw: &str) -> (String, bool) {
    match crate::core::sanitize::strip_answer_marker(raw) {
        Some(rest) => (clean_text(rest), true),
        None => (clean_text(raw), false),
    }
}

/// Cleaned, non-empty cell text.
pub fn cleaned(row: &Row<'_>, col: Option<usize>) -> Option<String> {
    row.get(col).map(clean_text).filter(|t| !t.is_empty())
}

/* ---------------- pipeline ---------------- */

pub struct Normalizer<'a> {
    opts: &'a NormalizeOptions,
    classifier: &'a Classifier,
}

impl<'a> Normalizer<'a> {
    pub fn new(opts: &'a NormalizeOptions, classifier: &'a Classifier) -> Self {
        Self { opts, classifier }
    }

    /// Normalize a whole sheet.
    ///
    /// Errors only when the sheet cannot be interpreted at all (a required
    /// column does not resolve); everything row-level goes into the report.
    pub fn run(&self, sheet: &Sheet, progress: &mut dyn Progress) -> Result<Normalized> {
        let mut report = RunReport::default();
        if sheet.headers.is_empty() {
            logw!("sheet is empty");
            return Ok(Normalized { records: vec![], report });
        }

        let format = self.opts.format.concrete(&sheet.headers);
        let mode = self.opts.mode_for(format);
        report.format = Some(format);
        report.mode = Some(mode);
        report.rows_seen = sheet.len();
        logf!("{} rows, format {}, {:?} validation", sheet.len(), format, mode);

        let resolver = format.resolver();
        let (roles, required): (&[Role], &[Role]) = match format {
            SourceFormat::Grouped | SourceFormat::Auto => (grouped::ROLES, grouped::REQUIRED),
            SourceFormat::Flat => (flat::ROLES, flat::REQUIRED),
            SourceFormat::Positional => (positional::ROLES, positional::REQUIRED),
        };
        let cols = ColumnMap::build(resolver.as_ref(), &sheet.headers, roles);
        if let Some(&missing) = required.iter().find(|r| !cols.has(**r)) {
            return Err(Error::MissingColumn(missing));
        }

        progress.begin(sheet.len());
        let mut drafts = Drafts::default();
        for row in sheet.iter_rows() {
            let outcome = match format {
                SourceFormat::Grouped | SourceFormat::Auto => {
                    grouped::scan_row(&row, &cols, self.opts, &mut drafts)
                }
                SourceFormat::Flat => flat::scan_row(&row, &cols, &mut drafts),
                SourceFormat::Positional => positional::scan_row(&row, &cols, &mut drafts),
            };
            if let Err(e) = outcome {
                report.skip(row.line, e);
            }
            progress.item_done();
        }
        report.drafts = drafts.len();
        progress.log(&format!("{} questions assembled", drafts.len()));

        let mut records = Vec::with_capacity(drafts.len());
        let mut defaulted: HashSet<String> = HashSet::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        for (i, draft) in drafts.into_vec().into_iter().enumerate() {
            let (record, was_defaulted) = self.finalize(draft, i + 1);
            if let Err(why) = validate::check(&record, mode) {
                report.reject(&record.id, why);
                continue;
            }
            if !seen_ids.insert(record.id.clone()) {
                report.reject(&record.id, Rejection::DuplicateId);
                continue;
            }
            if was_defaulted {
                defaulted.insert(record.id.clone());
            }
            records.push(record);
        }
        report.accepted = records.len();

        if let Some(limit) = self.opts.limit {
            if records.len() > limit {
                report.capped = records.len() - limit;
                records.truncate(limit);
                logf!("limit {} applied, {} dropped", limit, report.capped);
            }
        }

        report.defaulted_answers = records
            .iter()
            .filter(|r| defaulted.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();
        if !report.defaulted_answers.is_empty() {
            logw!(
                "{} question(s) without a correct-answer marker default to option A",
                report.defaulted_answers.len()
            );
        }

        progress.finish();
        Ok(Normalized { records, report })
    }

    /// Draft → record. `seq` is the 1-based draft position, used for
    /// generated ids. Also says whether the answer index was defaulted.
    pub fn finalize(&self, draft: Draft, seq: usize) -> (QuestionRecord, bool) {
        let id = match draft.key {
            Some(k) if !k.is_empty() => k,
            _ => format!("Q{seq:04}"),
        };
        let text = draft.text;

        let mut category = draft.course.clone().unwrap_or_else(|| self.opts.default_category.clone());
        let mut challenge = self.opts.default_challenge;
        if let Some(hit) = self.classifier.classify(draft.course.as_deref(), &text) {
            if let Some(c) = hit.category {
                category = c;
            }
            if let Some(ct) = hit.challenge {
                challenge = ct;
            }
        }
        if let Some(ct) = draft.challenge {
            challenge = ct;
        }

        let explanation = match (draft.explanation, &draft.course) {
            (Some(e), _) => e,
            (None, Some(course)) => format!("Questão extraída do curso: {course}"),
            (None, None) => format!("Questão {id}"),
        };

        let defaulted = draft.correct.is_none();
        let record = QuestionRecord {
            id,
            text,
            options: draft.slots.into_iter().map(Option::unwrap_or_default).collect(),
            correct_answer_index: draft.correct.unwrap_or(0),
            difficulty: self.opts.difficulty,
            category,
            challenge_type: challenge,
            explanation,
        };
        (record, defaulted)
    }
}

/// One-call form with the default classifier tables.
pub fn normalize(sheet: &Sheet, opts: &NormalizeOptions, progress: &mut dyn Progress) -> Result<Normalized> {
    let classifier = Classifier::default();
    Normalizer::new(opts, &classifier).run(sheet, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use crate::validate::ValidationMode;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::from_rows(rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect())
    }

    #[test]
    fn flags_parse() {
        for t in ["1", "1.0", "TRUE", "Sim", "x", "verdadeiro"] {
            assert_eq!(parse_flag(t), Ok(true), "{t}");
        }
        for f in ["", "0", "false", "NÃO", "nao", "falso"] {
            assert_eq!(parse_flag(f), Ok(false), "{f}");
        }
        assert_eq!(parse_flag("maybe"), Err(RowError::BadFlag(s!("maybe"))));
    }

    #[test]
    fn options_fill_letter_slots_and_append() {
        let mut d = Draft::new(2);
        assert_eq!(d.put_option(Some(2), s!("c")), Some(2));
        assert_eq!(d.put_option(Some(0), s!("a")), Some(0));
        assert_eq!(d.put_option(Some(0), s!("again")), None);
        assert_eq!(d.slots, vec![Some(s!("a")), None, Some(s!("c"))]);
        assert_eq!(d.put_option(None, s!("d")), Some(3));
    }

    #[test]
    fn marker_is_detected_and_stripped() {
        assert_eq!(option_text("* <b>Sim</b>"), (s!("Sim"), true));
        assert_eq!(option_text("✓Não"), (s!("Não"), true));
        assert_eq!(option_text("Talvez"), (s!("Talvez"), false));
    }

    #[test]
    fn finalize_defaults_and_placeholders() {
        let opts = NormalizeOptions::default();
        let classifier = Classifier::default();
        let n = Normalizer::new(&opts, &classifier);

        let mut d = Draft::new(2);
        d.text = s!("Pergunta qualquer");
        d.slots = vec![Some(s!("a")), Some(s!("b"))];
        let (r, defaulted) = n.finalize(d, 7);
        assert!(defaulted);
        assert_eq!(r.id, "Q0007");
        assert_eq!(r.correct_answer_index, 0);
        assert_eq!(r.category, "Direito Geral");
        assert_eq!(r.challenge_type, ChallengeType::Oab1Fase);
        assert_eq!(r.explanation, "Questão Q0007");

        let mut d = Draft::new(3);
        d.key = Some(s!("55"));
        d.course = Some(s!("Ética Profissional"));
        d.correct = Some(1);
        let (r, defaulted) = n.finalize(d, 1);
        assert!(!defaulted);
        assert_eq!(r.id, "55");
        assert_eq!(r.category, "Ética Profissional");
        assert_eq!(r.explanation, "Questão extraída do curso: Ética Profissional");
    }

    #[test]
    fn explicit_challenge_beats_classifier() {
        let opts = NormalizeOptions::default();
        let classifier = Classifier::default();
        let n = Normalizer::new(&opts, &classifier);
        let mut d = Draft::new(2);
        d.course = Some(s!("Direito Penal"));
        d.challenge = Some(ChallengeType::ConcursosEnam);
        let (r, _) = n.finalize(d, 1);
        assert_eq!(r.category, "Direito Penal");
        assert_eq!(r.challenge_type, ChallengeType::ConcursosEnam);
    }

    #[test]
    fn duplicate_ids_and_limit() {
        let s = sheet(&[
            &["ID", "QUESTÃO", "A)", "B)", "C)", "D)", "GABARITO"],
            &["7", "Um", "a1", "b1", "c1", "d1", "A"],
            &["7", "Dois", "a2", "b2", "c2", "d2", "B"],
            &["8", "Três", "a3", "b3", "c3", "d3", "C"],
            &["9", "Quatro", "a4", "b4", "c4", "d4", "D"],
        ]);
        let opts = NormalizeOptions { limit: Some(1), ..Default::default() };
        let out = normalize(&s, &opts, &mut NullProgress).unwrap();
        assert_eq!(out.report.format, Some(SourceFormat::Flat));
        assert_eq!(out.report.rejected.len(), 1);
        assert_eq!(out.report.rejected[0].reason, Rejection::DuplicateId);
        assert_eq!(out.report.accepted, 3);
        assert_eq!(out.report.capped, 2);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].text, "Um");
    }

    #[test]
    fn forced_grouped_without_key_is_a_source_error() {
        let s = sheet(&[&["QUESTÃO", "A)"], &["x", "y"]]);
        let opts = NormalizeOptions { format: SourceFormat::Grouped, ..Default::default() };
        let err = normalize(&s, &opts, &mut NullProgress).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(Role::Key)));
    }

    #[test]
    fn empty_sheet_is_empty_result() {
        let out = normalize(&Sheet::default(), &NormalizeOptions::default(), &mut NullProgress).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.report.rows_seen, 0);
    }

    #[test]
    fn defaulted_answers_only_list_output_records() {
        let s = sheet(&[
            &["pergunta", "a", "b", "c"],
            &["Sem marcador", "um", "dois", ""],
            &["Com marcador", "um", "*dois", ""],
            &["Só uma", "um", "", ""],
        ]);
        let opts = NormalizeOptions { format: SourceFormat::Positional, ..Default::default() };
        let out = normalize(&s, &opts, &mut NullProgress).unwrap();
        assert_eq!(out.report.mode, Some(ValidationMode::Lenient));
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].correct_answer_index, 1);
        assert_eq!(out.report.defaulted_answers, vec![s!("Q0001")]);
        assert_eq!(out.report.rejected.len(), 1);
    }
}
