// src/normalize/flat.rs
//
// One row per question, options side by side:
//
//   QUESTÃO | A) | B) | C) | D) | GABARITO | DISCIPLINA | TIPO
//
// The answer key is a letter; a `*`/`✓` marker on an option also counts.
// A missing option cell stays an empty option so strict validation sees it.

use super::{Draft, Drafts, cleaned, option_text};
use crate::columns::{ColumnMap, Role, index_for_letter};
use crate::question::ChallengeType;
use crate::report::RowError;
use crate::source::Row;

pub(super) const ROLES: &[Role] = &[
    Role::Key,
    Role::Text,
    Role::Option(0),
    Role::Option(1),
    Role::Option(2),
    Role::Option(3),
    Role::Answer,
    Role::Course,
    Role::Challenge,
    Role::Explanation,
];

pub(super) const REQUIRED: &[Role] = &[Role::Text];

pub(super) fn scan_row(row: &Row<'_>, cols: &ColumnMap, drafts: &mut Drafts) -> Result<(), RowError> {
    let text = cleaned(row, cols.get(Role::Text)).ok_or(RowError::MissingField(Role::Text))?;

    let answer = match row.get(cols.get(Role::Answer)) {
        Some(l) => Some(index_for_letter(l).ok_or_else(|| RowError::BadLetter(s!(l.trim())))?),
        None => None,
    };

    let mut draft = Draft::new(row.line);
    draft.key = row.get(cols.get(Role::Key)).map(|k| s!(k.trim()));
    draft.text = text;
    draft.course = cleaned(row, cols.get(Role::Course));
    draft.explanation = cleaned(row, cols.get(Role::Explanation));
    draft.challenge = row.get(cols.get(Role::Challenge)).and_then(|raw| {
        let ct = ChallengeType::from_loose(raw);
        if ct.is_none() {
            logd!("line {}: challenge type {:?} not recognized", row.line, raw);
        }
        ct
    });

    for i in 0..4u8 {
        let (opt, marked) = row.get(cols.get(Role::Option(i))).map(option_text).unwrap_or_default();
        if let Some(ix) = draft.put_option(Some(i as usize), opt) {
            if marked {
                draft.mark_correct(ix);
            }
        }
    }
    // the answer column outranks markers
    if let Some(ix) = answer {
        draft.correct = Some(ix);
    }

    drafts.push(draft);
    Ok(())
}
