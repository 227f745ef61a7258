// src/columns.rs
//! Column discovery.
//!
//! Question banks arrive in several shapes and none of them has a fixed
//! schema, so the normalizer never indexes columns by name directly. It asks a
//! [`ColumnResolver`] "which column plays this [`Role`]?" and works with the
//! answer (or its absence). One resolver per [`SourceFormat`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// What a column means to the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Question identifier shared by every row of one question.
    Key,
    /// Question prompt.
    Text,
    /// One answer option's text (grouped format: one per row).
    Description,
    /// Per-row "this option is correct" flag.
    Correct,
    /// Option letter A–D for the row.
    Letter,
    /// Course / discipline name used for classification.
    Course,
    /// Option column 0..=3 (flat and positional formats).
    Option(u8),
    /// Answer-key letter column (flat format).
    Answer,
    /// Explicit challenge-type column (flat format).
    Challenge,
    /// Free-text explanation column.
    Explanation,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Key => f.write_str("question key"),
            Role::Text => f.write_str("question text"),
            Role::Description => f.write_str("option description"),
            Role::Correct => f.write_str("correct flag"),
            Role::Letter => f.write_str("option letter"),
            Role::Course => f.write_str("course name"),
            Role::Option(i) => write!(f, "option {}", letter_for(*i as usize)),
            Role::Answer => f.write_str("answer key"),
            Role::Challenge => f.write_str("challenge type"),
            Role::Explanation => f.write_str("explanation"),
        }
    }
}

/// 0 → 'A', 1 → 'B', …
pub fn letter_for(index: usize) -> char {
    (b'A' + (index as u8 % 26)) as char
}

/// 'A'..='D' (any case, surrounding junk like "b)" tolerated) → 0..=3.
pub fn index_for_letter(raw: &str) -> Option<usize> {
    let t = raw.trim().trim_end_matches([')', '.', '-']).trim();
    let mut chars = t.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    match c {
        'A'..='D' => Some((c as u8 - b'A') as usize),
        _ => None,
    }
}

/// Capability: map a role onto a column index of the header row.
pub trait ColumnResolver {
    fn name(&self) -> &'static str;
    fn resolve(&self, role: Role, headers: &[String]) -> Option<usize>;
}

/* ---------------- matching helpers ---------------- */

/// First header equal to any candidate; exact match beats case-insensitive.
fn find_named(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for cand in candidates {
        if let Some(i) = headers.iter().position(|h| h.trim() == *cand) {
            return Some(i);
        }
    }
    for cand in candidates {
        let cand = cand.to_lowercase();
        if let Some(i) = headers.iter().position(|h| h.trim().to_lowercase() == cand) {
            return Some(i);
        }
    }
    None
}

/// First header containing any needle (case-insensitive).
fn find_containing(headers: &[String], needles: &[&str]) -> Option<usize> {
    let upper: Vec<String> = headers.iter().map(|h| h.to_uppercase()).collect();
    upper
        .iter()
        .position(|h| needles.iter().any(|n| h.contains(&n.to_uppercase())))
}

const ANSWER_HEADERS: &[&str] = &["GABARITO", "RESPOSTA", "CORRETA", "ANSWER"];

/// Option column: exact header first, then a header starting with a needle,
/// then any header containing one. Answer-key headers ("RESPOSTA (A-D)")
/// never count as an option column.
fn find_option_column(headers: &[String], needles: &[&str]) -> Option<usize> {
    if let Some(i) = find_named(headers, needles) {
        return Some(i);
    }
    let upper: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();
    let needles: Vec<String> = needles.iter().map(|n| n.to_uppercase()).collect();
    let is_answer = |h: &str| ANSWER_HEADERS.iter().any(|a| h.contains(a));
    upper
        .iter()
        .position(|h| needles.iter().any(|n| h.starts_with(n.as_str())))
        .or_else(|| find_containing(headers, &needles.iter().map(String::as_str).collect::<Vec<_>>()))
        .filter(|&i| !is_answer(&upper[i]))
}

/* ---------------- strategies ---------------- */

/// One row per option: `ObjectQuestionId, QuestionStem, Letter, Description, Correct, Name`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupedColumns;

impl ColumnResolver for GroupedColumns {
    fn name(&self) -> &'static str { "grouped" }

    fn resolve(&self, role: Role, headers: &[String]) -> Option<usize> {
        let candidates: &[&str] = match role {
            Role::Key => &["ObjectQuestionId", "QuestionId"],
            Role::Text => &["QuestionStem"],
            Role::Description => &["Description"],
            Role::Correct => &["Correct"],
            Role::Letter => &["Letter"],
            Role::Course => &["Name", "CourseName"],
            Role::Explanation => &["Explanation", "Feedback"],
            _ => return None,
        };
        find_named(headers, candidates)
    }
}

/// One row per question with `A)`..`D)` option columns and a `GABARITO` letter.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatColumns;

impl ColumnResolver for FlatColumns {
    fn name(&self) -> &'static str { "flat" }

    fn resolve(&self, role: Role, headers: &[String]) -> Option<usize> {
        match role {
            Role::Key => find_named(headers, &["ID", "CODIGO", "CÓDIGO"]),
            Role::Text => find_named(headers, &["QUESTÃO", "QUESTAO", "TEXTO", "PERGUNTA", "ENUNCIADO"]),
            Role::Option(i) if i < 4 => {
                let l = letter_for(i as usize);
                let paren = format!("{l})");
                let plain = format!("OPCAO_{l}");
                let accented = format!("OPÇÃO_{l}");
                find_option_column(headers, &[paren.as_str(), plain.as_str(), accented.as_str()])
            }
            Role::Answer => find_named(headers, ANSWER_HEADERS),
            Role::Course => find_named(headers, &["DISCIPLINA", "MATERIA", "MATÉRIA", "CATEGORIA", "AREA", "ÁREA"]),
            Role::Challenge => find_named(headers, &["TIPO", "CHALLENGE_TYPE", "MODALIDADE"]),
            Role::Explanation => find_named(
                headers,
                &["EXPLICACAO", "EXPLICAÇÃO", "JUSTIFICATIVA", "COMENTARIO", "COMENTÁRIO", "FUNDAMENTACAO", "FUNDAMENTAÇÃO"],
            ),
            _ => None,
        }
    }
}

/// No usable headers: text, four options, course, by position.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalColumns;

impl ColumnResolver for PositionalColumns {
    fn name(&self) -> &'static str { "positional" }

    fn resolve(&self, role: Role, headers: &[String]) -> Option<usize> {
        let ix = match role {
            Role::Text => 0,
            Role::Option(i) if i < 4 => 1 + i as usize,
            Role::Course => 5,
            _ => return None,
        };
        (ix < headers.len()).then_some(ix)
    }
}

/* ---------------- formats ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Auto,
    Grouped,
    Flat,
    Positional,
}

impl SourceFormat {
    /// Decide a concrete format from the header row. Never returns `Auto`.
    pub fn detect(headers: &[String]) -> SourceFormat {
        let grouped = GroupedColumns;
        if grouped.resolve(Role::Key, headers).is_some()
            && grouped.resolve(Role::Description, headers).is_some()
        {
            return SourceFormat::Grouped;
        }
        if FlatColumns.resolve(Role::Text, headers).is_some() {
            return SourceFormat::Flat;
        }
        SourceFormat::Positional
    }

    pub fn concrete(self, headers: &[String]) -> SourceFormat {
        match self {
            SourceFormat::Auto => SourceFormat::detect(headers),
            other => other,
        }
    }

    pub fn resolver(self) -> Box<dyn ColumnResolver> {
        match self {
            SourceFormat::Grouped | SourceFormat::Auto => Box::new(GroupedColumns),
            SourceFormat::Flat => Box::new(FlatColumns),
            SourceFormat::Positional => Box::new(PositionalColumns),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Auto => "auto",
            SourceFormat::Grouped => "grouped",
            SourceFormat::Flat => "flat",
            SourceFormat::Positional => "positional",
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceFormat::Auto),
            "grouped" | "stem" => Ok(SourceFormat::Grouped),
            "flat" | "columns" => Ok(SourceFormat::Flat),
            "positional" => Ok(SourceFormat::Positional),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved roles for one sheet.
#[derive(Clone, Debug, Default)]
pub struct ColumnMap {
    cols: HashMap<Role, usize>,
}

impl ColumnMap {
    pub fn build(resolver: &dyn ColumnResolver, headers: &[String], roles: &[Role]) -> Self {
        let mut cols = HashMap::new();
        for &role in roles {
            match resolver.resolve(role, headers) {
                Some(ix) => {
                    logd!("{}: {} -> column {} ({:?})", resolver.name(), role, ix, headers[ix]);
                    cols.insert(role, ix);
                }
                None => logd!("{}: {} not present", resolver.name(), role),
            }
        }
        Self { cols }
    }

    pub fn get(&self, role: Role) -> Option<usize> {
        self.cols.get(&role).copied()
    }

    pub fn has(&self, role: Role) -> bool {
        self.cols.contains_key(&role)
    }
}
