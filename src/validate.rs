// src/validate.rs
use std::fmt;
use std::str::FromStr;

use crate::config::consts::{LENIENT_MIN_OPTIONS, STRICT_OPTION_COUNT};
use crate::question::QuestionRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Exactly four options, none empty.
    Strict,
    /// At least two options.
    Lenient,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(format!("Unknown validation mode: {other}")),
        }
    }
}

/// Why a finished record was dropped. Not an error: rejected records are
/// only counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyText,
    WrongOptionCount { found: usize, expected: usize },
    TooFewOptions { found: usize, min: usize },
    EmptyOption { index: usize },
    AnswerOutOfRange { index: usize, options: usize },
    DuplicateId,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyText => f.write_str("empty question text"),
            Rejection::WrongOptionCount { found, expected } => {
                write!(f, "{found} options, expected exactly {expected}")
            }
            Rejection::TooFewOptions { found, min } => write!(f, "{found} options, need at least {min}"),
            Rejection::EmptyOption { index } => {
                write!(f, "option {} is empty", crate::columns::letter_for(*index))
            }
            Rejection::AnswerOutOfRange { index, options } => {
                write!(f, "correct answer index {index} outside {options} options")
            }
            Rejection::DuplicateId => f.write_str("duplicate id"),
        }
    }
}

impl Rejection {
    /// Stable short label for summary tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::EmptyText => "empty text",
            Rejection::WrongOptionCount { .. } => "wrong option count",
            Rejection::TooFewOptions { .. } => "too few options",
            Rejection::EmptyOption { .. } => "empty option",
            Rejection::AnswerOutOfRange { .. } => "answer out of range",
            Rejection::DuplicateId => "duplicate id",
        }
    }
}

/// Accept or reject one record. Records are never repaired here.
pub fn check(record: &QuestionRecord, mode: ValidationMode) -> Result<(), Rejection> {
    if record.text.trim().is_empty() {
        return Err(Rejection::EmptyText);
    }

    let n = record.options.len();
    match mode {
        ValidationMode::Strict => {
            if n != STRICT_OPTION_COUNT {
                return Err(Rejection::WrongOptionCount { found: n, expected: STRICT_OPTION_COUNT });
            }
            if let Some(index) = record.options.iter().position(|o| o.trim().is_empty()) {
                return Err(Rejection::EmptyOption { index });
            }
        }
        ValidationMode::Lenient => {
            if n < LENIENT_MIN_OPTIONS {
                return Err(Rejection::TooFewOptions { found: n, min: LENIENT_MIN_OPTIONS });
            }
        }
    }

    if record.correct_answer_index >= n {
        return Err(Rejection::AnswerOutOfRange { index: record.correct_answer_index, options: n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::ChallengeType;

    fn rec(text: &str, options: &[&str], correct: usize) -> QuestionRecord {
        QuestionRecord {
            id: s!("Q"),
            text: s!(text),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_index: correct,
            difficulty: 2,
            category: s!("Direito Geral"),
            challenge_type: ChallengeType::Oab1Fase,
            explanation: s!(),
        }
    }

    #[test]
    fn strict_needs_four_filled_options() {
        assert_eq!(check(&rec("q", &["a", "b", "c", "d"], 3), ValidationMode::Strict), Ok(()));
        assert_eq!(
            check(&rec("q", &["a", "b", "c"], 0), ValidationMode::Strict),
            Err(Rejection::WrongOptionCount { found: 3, expected: 4 })
        );
        assert_eq!(
            check(&rec("q", &["a", " ", "c", "d"], 0), ValidationMode::Strict),
            Err(Rejection::EmptyOption { index: 1 })
        );
    }

    #[test]
    fn lenient_needs_two() {
        assert_eq!(check(&rec("q", &["a", "b"], 1), ValidationMode::Lenient), Ok(()));
        assert_eq!(check(&rec("q", &["a", "", "c"], 0), ValidationMode::Lenient), Ok(()));
        assert_eq!(
            check(&rec("q", &["a"], 0), ValidationMode::Lenient),
            Err(Rejection::TooFewOptions { found: 1, min: 2 })
        );
    }

    #[test]
    fn empty_text_and_bad_answer() {
        assert_eq!(check(&rec("  ", &["a", "b", "c", "d"], 0), ValidationMode::Strict), Err(Rejection::EmptyText));
        assert_eq!(
            check(&rec("q", &["a", "b"], 2), ValidationMode::Lenient),
            Err(Rejection::AnswerOutOfRange { index: 2, options: 2 })
        );
    }

    #[test]
    fn mode_parses() {
        assert_eq!("STRICT".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert!("loose".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn rejection_messages_name_the_option_letter() {
        assert_eq!(Rejection::EmptyOption { index: 2 }.to_string(), "option C is empty");
    }
}
