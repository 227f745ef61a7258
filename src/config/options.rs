// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::columns::SourceFormat;
use crate::question::ChallengeType;
use crate::validate::ValidationMode;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub input: InputOptions,
    pub normalize: NormalizeOptions,
    pub export: ExportOptions,
    pub sample: SampleOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputOptions {
    pub path: PathBuf,
    /// Worksheet name; `None` = first sheet.
    pub sheet: Option<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_INPUT), sheet: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub format: SourceFormat,
    /// `None` = the format's own default (see [`NormalizeOptions::mode_for`]).
    pub mode: Option<ValidationMode>,
    pub difficulty: u8,
    pub default_category: String,
    pub default_challenge: ChallengeType,
    /// Keep at most this many accepted records (encounter order).
    pub limit: Option<usize>,
    pub short_option_max_chars: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            format: SourceFormat::Auto,
            mode: None,
            difficulty: DEFAULT_DIFFICULTY,
            default_category: s!(DEFAULT_CATEGORY),
            default_challenge: ChallengeType::Oab1Fase,
            limit: None,
            short_option_max_chars: SHORT_OPTION_MAX_CHARS,
        }
    }
}

impl NormalizeOptions {
    /// Positional sheets were only ever held to the lenient rule.
    pub fn mode_for(&self, format: SourceFormat) -> ValidationMode {
        self.mode.unwrap_or(match format {
            SourceFormat::Positional => ValidationMode::Lenient,
            _ => ValidationMode::Strict,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralOptions {
    pub const_name: String,
    /// Emit the `Question` import + `Omit<…>[]` annotation and drop `id`.
    pub typed: bool,
    /// `// N questões` line on top.
    pub header_comment: bool,
    /// Cut question text to this many chars (+ "...") in the literal only.
    pub truncate_text: Option<usize>,
}

impl Default for LiteralOptions {
    fn default() -> Self {
        Self {
            const_name: s!(DEFAULT_CONST_NAME),
            typed: false,
            header_comment: true,
            truncate_text: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub json_path: Option<PathBuf>,
    pub ts_path: Option<PathBuf>,
    pub literal: LiteralOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let dir = PathBuf::from(DEFAULT_OUT_DIR);
        Self {
            json_path: Some(dir.join(DEFAULT_JSON_FILE)),
            ts_path: Some(dir.join(DEFAULT_TS_FILE)),
            literal: LiteralOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleOptions {
    pub target: usize,
    pub min_per_category: usize,
    pub max_per_category: usize,
    /// Carry every record of the non-majority challenge types.
    pub include_minority: bool,
    pub out_path: PathBuf,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            target: SAMPLE_TARGET,
            min_per_category: SAMPLE_MIN_PER_CATEGORY,
            max_per_category: SAMPLE_MAX_PER_CATEGORY,
            include_minority: true,
            out_path: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_SAMPLE_FILE),
        }
    }
}
