// src/export/json.rs
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::question::QuestionRecord;

/// Pretty JSON array, 2-space indent, UTF-8 kept as is, trailing newline.
pub fn to_json_string(records: &[QuestionRecord]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

/// Load a record array written by [`to_json_string`] (or by the game client).
pub fn read_records(path: &Path) -> Result<Vec<QuestionRecord>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let records: Vec<QuestionRecord> = serde_json::from_str(&text)?;
    logd!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::ChallengeType;

    fn rec() -> QuestionRecord {
        QuestionRecord {
            id: s!("Q1"),
            text: s!("O que é X?"),
            options: vec![s!("Opção Um"), s!("Opção Dois")],
            correct_answer_index: 0,
            difficulty: 2,
            category: s!("Direito Geral"),
            challenge_type: ChallengeType::ConcursosCnu,
            explanation: s!(),
        }
    }

    #[test]
    fn field_order_and_unicode() {
        let out = to_json_string(&[rec()]).unwrap();
        let expected = r#"[
  {
    "id": "Q1",
    "text": "O que é X?",
    "options": [
      "Opção Um",
      "Opção Dois"
    ],
    "correctAnswerIndex": 0,
    "difficulty": 2,
    "category": "Direito Geral",
    "challengeType": "CONCURSOS_CNU",
    "explanation": ""
  }
]
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_is_brackets() {
        assert_eq!(to_json_string(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn reads_back_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.json");
        fs::write(&path, to_json_string(&[rec()]).unwrap()).unwrap();
        assert_eq!(read_records(&path).unwrap(), vec![rec()]);
    }
}
