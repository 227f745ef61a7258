// src/classify.rs
//! Keyword classification.
//!
//! Two ordered rule tables, consulted in order, first match wins:
//! 1. the **course table**, matched against the source's course/discipline
//!    name when there is one;
//! 2. the **text table**, matched against the cleaned question text when
//!    there is no course name or no course rule fired.
//!
//! Matching is a case-insensitive substring test. Table order is the
//! contract: a course named "Direito Civil e Penal" is civil because the
//! civil rule comes first.

use crate::question::ChallengeType;

/// `any keyword matches` → set category and/or challenge type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    keywords: Vec<String>,
    pub category: Option<String>,
    pub challenge: Option<ChallengeType>,
}

impl Rule {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            category: None,
            challenge: None,
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(s!(category));
        self
    }

    pub fn challenge(mut self, challenge: ChallengeType) -> Self {
        self.challenge = Some(challenge);
        self
    }

    /// `haystack` must already be lowercased.
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Course,
    Text,
}

/// What a matching rule wants changed. `None` fields leave the record alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub category: Option<String>,
    pub challenge: Option<ChallengeType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    course_rules: Vec<Rule>,
    text_rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_course_rules(), default_text_rules())
    }
}

impl Classifier {
    pub fn new(course_rules: Vec<Rule>, text_rules: Vec<Rule>) -> Self {
        Self { course_rules, text_rules }
    }

    pub fn course_rules(&self) -> &[Rule] { &self.course_rules }
    pub fn text_rules(&self) -> &[Rule] { &self.text_rules }

    pub fn classify(&self, course: Option<&str>, text: &str) -> Option<Classification> {
        if let Some(course) = course.filter(|c| !c.trim().is_empty()) {
            if let Some(hit) = first_match(&self.course_rules, course, Tier::Course) {
                return Some(hit);
            }
        }
        first_match(&self.text_rules, text, Tier::Text)
    }
}

fn first_match(rules: &[Rule], haystack: &str, tier: Tier) -> Option<Classification> {
    let lc = haystack.to_lowercase();
    rules.iter().find(|r| r.matches(&lc)).map(|r| Classification {
        tier,
        category: r.category.clone(),
        challenge: r.challenge,
    })
}

/* ---------------- default tables ---------------- */

pub fn default_course_rules() -> Vec<Rule> {
    use ChallengeType::*;
    vec![
        Rule::new(&["constitucional"]).category("Direito Constitucional").challenge(Oab1Fase),
        Rule::new(&["civil"]).category("Direito Civil").challenge(Oab1Fase),
        Rule::new(&["penal"]).category("Direito Penal").challenge(Oab1Fase),
        Rule::new(&["processo"]).category("Processo Civil").challenge(Oab1Fase),
        Rule::new(&["trabalho"]).category("Direito do Trabalho").challenge(Oab1Fase),
        Rule::new(&["empresarial"]).category("Direito Empresarial").challenge(Oab1Fase),
        Rule::new(&["administrativo"]).category("Direito Administrativo").challenge(ConcursosMpsp),
        // track-only: keep whatever category the record already has
        Rule::new(&["mpsp"]).challenge(ConcursosMpsp),
        Rule::new(&["defensoria"]).challenge(ConcursosDefensoria),
        Rule::new(&["tribunal"]).challenge(ConcursosTribunais),
        Rule::new(&["procuradoria"]).challenge(ConcursosProcuradorias),
        Rule::new(&["enam"]).challenge(ConcursosEnam),
        Rule::new(&["cnu"]).challenge(ConcursosCnu),
        Rule::new(&["concurso"]).challenge(ConcursosMpsp),
    ]
}

pub fn default_text_rules() -> Vec<Rule> {
    use ChallengeType::*;
    vec![
        Rule::new(&["tribunal do júri", "homicídio", "crime"]).category("Direito Penal").challenge(Oab1Fase),
        Rule::new(&["ministério público", "promotor"]).challenge(ConcursosMpsp),
        Rule::new(&["defensoria", "defensor"]).challenge(ConcursosDefensoria),
        Rule::new(&["tribunal", "magistratura"]).challenge(ConcursosTribunais),
    ]
}
