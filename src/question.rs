// src/question.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Exam track a question belongs to. Serialized with the labels the
/// front end and database already use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChallengeType {
    #[default]
    #[serde(rename = "OAB_1_FASE")]
    Oab1Fase,
    #[serde(rename = "CONCURSOS_MPSP")]
    ConcursosMpsp,
    #[serde(rename = "CONCURSOS_DEFENSORIA")]
    ConcursosDefensoria,
    #[serde(rename = "CONCURSOS_TRIBUNAIS")]
    ConcursosTribunais,
    #[serde(rename = "CONCURSOS_PROCURADORIAS")]
    ConcursosProcuradorias,
    #[serde(rename = "CONCURSOS_ENAM")]
    ConcursosEnam,
    #[serde(rename = "CONCURSOS_CNU")]
    ConcursosCnu,
}

impl ChallengeType {
    pub const ALL: [ChallengeType; 7] = [
        ChallengeType::Oab1Fase,
        ChallengeType::ConcursosMpsp,
        ChallengeType::ConcursosDefensoria,
        ChallengeType::ConcursosTribunais,
        ChallengeType::ConcursosProcuradorias,
        ChallengeType::ConcursosEnam,
        ChallengeType::ConcursosCnu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChallengeType::Oab1Fase => "OAB_1_FASE",
            ChallengeType::ConcursosMpsp => "CONCURSOS_MPSP",
            ChallengeType::ConcursosDefensoria => "CONCURSOS_DEFENSORIA",
            ChallengeType::ConcursosTribunais => "CONCURSOS_TRIBUNAIS",
            ChallengeType::ConcursosProcuradorias => "CONCURSOS_PROCURADORIAS",
            ChallengeType::ConcursosEnam => "CONCURSOS_ENAM",
            ChallengeType::ConcursosCnu => "CONCURSOS_CNU",
        }
    }

    /// Read a free-form "type" cell. Exact labels first, then the loose
    /// spellings seen in sheets ("Concurso", "MPSP", "1ª fase").
    pub fn from_loose(raw: &str) -> Option<ChallengeType> {
        let up = raw.trim().to_uppercase();
        if let Some(t) = Self::ALL.iter().find(|t| t.label() == up) {
            return Some(*t);
        }
        if up.contains("DEFENSORIA") { return Some(ChallengeType::ConcursosDefensoria); }
        if up.contains("TRIBUNA") { return Some(ChallengeType::ConcursosTribunais); }
        if up.contains("PROCURADORIA") { return Some(ChallengeType::ConcursosProcuradorias); }
        if up.contains("ENAM") { return Some(ChallengeType::ConcursosEnam); }
        if up.contains("CNU") { return Some(ChallengeType::ConcursosCnu); }
        if up.contains("CONCURSO") || up.contains("MPSP") { return Some(ChallengeType::ConcursosMpsp); }
        if up.contains("OAB") || up.contains("FASE") { return Some(ChallengeType::Oab1Fase); }
        None
    }
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChallengeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_loose(s).ok_or_else(|| format!("Unknown challenge type: {s}"))
    }
}

/// One finished question, the unit both sinks serialize.
///
/// Field order here is the field order in the JSON and literal outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub difficulty: u8,
    pub category: String,
    pub challenge_type: ChallengeType,
    pub explanation: String,
}

impl QuestionRecord {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer_index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuestionRecord {
        QuestionRecord {
            id: s!("Q1"),
            text: s!("O que é X?"),
            options: vec![s!("Opção Um"), s!("Opção Dois")],
            correct_answer_index: 1,
            difficulty: 2,
            category: s!("Direito Civil"),
            challenge_type: ChallengeType::ConcursosMpsp,
            explanation: s!("Questão Q1"),
        }
    }

    #[test]
    fn serializes_with_front_end_field_names() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"id":"Q1","text":"O que é X?","options":["Opção Um","Opção Dois"],"correctAnswerIndex":1,"difficulty":2,"category":"Direito Civil","challengeType":"CONCURSOS_MPSP","explanation":"Questão Q1"}"#
        );
    }

    #[test]
    fn challenge_type_loose_parsing() {
        assert_eq!(ChallengeType::from_loose("OAB_1_FASE"), Some(ChallengeType::Oab1Fase));
        assert_eq!(ChallengeType::from_loose("Concurso MPSP"), Some(ChallengeType::ConcursosMpsp));
        assert_eq!(ChallengeType::from_loose("defensoria pública"), Some(ChallengeType::ConcursosDefensoria));
        assert_eq!(ChallengeType::from_loose("1ª Fase"), Some(ChallengeType::Oab1Fase));
        assert_eq!(ChallengeType::from_loose("livre"), None);
    }

    #[test]
    fn correct_option_lookup() {
        assert_eq!(record().correct_option(), Some("Opção Dois"));
    }
}
