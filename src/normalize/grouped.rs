// src/normalize/grouped.rs
//
// One row per option, rows of a question share `ObjectQuestionId`:
//
//   ObjectQuestionId | QuestionStem | Letter | Description | Correct | Name
//   Q1               | O que é X?   | A      | Opção Um    | 1       | Direito Civil
//   Q1               |              | B      | Opção Dois  | 0       |
//
// The first row of a key fixes the question-level fields. Options shorter
// than the configured minimum are dropped as noise ("A", "B)", "-").

use super::{Draft, Drafts, cleaned, option_text, parse_flag};
use crate::columns::{ColumnMap, Role, index_for_letter, letter_for};
use crate::config::options::NormalizeOptions;
use crate::core::sanitize::char_len;
use crate::report::RowError;
use crate::source::Row;

pub(super) const ROLES: &[Role] = &[
    Role::Key,
    Role::Text,
    Role::Description,
    Role::Correct,
    Role::Letter,
    Role::Course,
    Role::Explanation,
];

pub(super) const REQUIRED: &[Role] = &[Role::Key, Role::Description];

pub(super) fn scan_row(
    row: &Row<'_>,
    cols: &ColumnMap,
    opts: &NormalizeOptions,
    drafts: &mut Drafts,
) -> Result<(), RowError> {
    let key = row
        .get(cols.get(Role::Key))
        .map(str::trim)
        .ok_or(RowError::MissingField(Role::Key))?;

    let draft = drafts.entry_with(key, || {
        let mut d = Draft::new(row.line);
        d.text = cleaned(row, cols.get(Role::Text)).unwrap_or_default();
        d.course = cleaned(row, cols.get(Role::Course));
        d.explanation = cleaned(row, cols.get(Role::Explanation));
        d
    });

    let raw = row
        .get(cols.get(Role::Description))
        .ok_or(RowError::MissingField(Role::Description))?;

    let slot = match row.get(cols.get(Role::Letter)) {
        Some(l) => Some(index_for_letter(l).ok_or_else(|| RowError::BadLetter(s!(l.trim())))?),
        None => None,
    };

    let flagged = match row.get(cols.get(Role::Correct)) {
        Some(v) => parse_flag(v)?,
        None => false,
    };

    let (text, marked) = option_text(raw);
    let chars = char_len(&text);
    if chars <= opts.short_option_max_chars {
        return Err(RowError::ShortOption { text, chars });
    }

    let ix = draft
        .put_option(slot, text)
        .ok_or_else(|| RowError::DuplicateLetter(letter_for(slot.unwrap_or_default())))?;
    if flagged || marked {
        draft.mark_correct(ix);
    }
    Ok(())
}
