// tests/sample_fixture.rs
use std::collections::HashMap;

use oab_questions::config::options::SampleOptions;
use oab_questions::sample::diverse_sample;
use oab_questions::{ChallengeType, QuestionRecord};

fn bank(n: usize, categories: usize) -> Vec<QuestionRecord> {
    (0..n)
        .map(|i| QuestionRecord {
            id: format!("Q{:04}", i + 1),
            text: format!("Pergunta {i}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer_index: i % 4,
            difficulty: 2,
            category: format!("Categoria {}", i % categories),
            challenge_type: ChallengeType::Oab1Fase,
            explanation: String::new(),
        })
        .collect()
}

#[test]
fn five_hundred_over_ten_categories_target_hundred() {
    let records = bank(500, 10);
    let opts = SampleOptions { target: 100, ..Default::default() };
    let (out, plan) = diverse_sample(&records, &opts);

    let expected_per_cat = (100 / 10).clamp(10, 50);
    assert_eq!(plan.per_category, expected_per_cat);
    assert_eq!(plan.categories, 10);
    assert!(out.len() <= 100);

    let mut per_cat: HashMap<&str, usize> = HashMap::new();
    for r in &out {
        *per_cat.entry(r.category.as_str()).or_default() += 1;
    }
    assert_eq!(per_cat.len(), 10);
    assert!(per_cat.values().all(|&n| n == expected_per_cat));
}

#[test]
fn categories_come_out_in_first_seen_order_with_source_order_inside() {
    let records = bank(40, 4);
    let opts = SampleOptions { target: 8, min_per_category: 2, max_per_category: 2, ..Default::default() };
    let (out, _) = diverse_sample(&records, &opts);
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["Q0001", "Q0005", "Q0002", "Q0006", "Q0003", "Q0007", "Q0004", "Q0008"]);
}

#[test]
fn small_categories_give_what_they_have() {
    let records = bank(12, 6);
    let (out, plan) = diverse_sample(&records, &SampleOptions::default());
    assert_eq!(plan.per_category, 50);
    assert_eq!(out.len(), 12);
}
