// src/normalize/positional.rs
//
// Headerless layout: text, up to four options, course. Present options are
// appended in column order; the correct one carries a `*`/`✓` marker.

use super::{Draft, Drafts, cleaned, option_text};
use crate::columns::{ColumnMap, Role};
use crate::report::RowError;
use crate::source::Row;

pub(super) const ROLES: &[Role] = &[
    Role::Text,
    Role::Option(0),
    Role::Option(1),
    Role::Option(2),
    Role::Option(3),
    Role::Course,
];

pub(super) const REQUIRED: &[Role] = &[Role::Text];

pub(super) fn scan_row(row: &Row<'_>, cols: &ColumnMap, drafts: &mut Drafts) -> Result<(), RowError> {
    let text = cleaned(row, cols.get(Role::Text)).ok_or(RowError::MissingField(Role::Text))?;

    let mut draft = Draft::new(row.line);
    draft.text = text;
    draft.course = cleaned(row, cols.get(Role::Course));

    for i in 0..4u8 {
        let Some(raw) = row.get(cols.get(Role::Option(i))) else { continue };
        let (opt, marked) = option_text(raw);
        if opt.is_empty() {
            continue;
        }
        if let Some(ix) = draft.put_option(None, opt) {
            if marked {
                draft.mark_correct(ix);
            }
        }
    }

    drafts.push(draft);
    Ok(())
}
