// src/config/consts.rs

// Input
pub const DEFAULT_INPUT: &str = "attached_assets/Questões MC 1ª FASE e Concursos.xlsx";
pub const DEFAULT_CONFIG_FILE: &str = "oabq.conf";

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_JSON_FILE: &str = "questions.json";
pub const DEFAULT_TS_FILE: &str = "questions.ts";
pub const DEFAULT_SAMPLE_FILE: &str = "questions_sample.json";
pub const DEFAULT_CONST_NAME: &str = "questionsData";
pub const TYPED_IMPORT: &str = r#"import { Question } from "@shared/schema";"#;
pub const TYPED_ANNOTATION: &str = "Omit<Question, 'id' | 'createdAt'>[]";

// Record defaults
pub const DEFAULT_DIFFICULTY: u8 = 2;
pub const DEFAULT_CATEGORY: &str = "Direito Geral";

// Validation
pub const STRICT_OPTION_COUNT: usize = 4;
pub const LENIENT_MIN_OPTIONS: usize = 2;
/// Grouped format only: cleaned options this short are treated as junk cells.
pub const SHORT_OPTION_MAX_CHARS: usize = 5;

// Sampling
pub const SAMPLE_TARGET: usize = 500;
pub const SAMPLE_MIN_PER_CATEGORY: usize = 10;
pub const SAMPLE_MAX_PER_CATEGORY: usize = 50;

// Reporting
pub const PREVIEW_COUNT: usize = 5;
pub const PREVIEW_TEXT_CHARS: usize = 100;
