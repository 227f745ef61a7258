// src/sample.rs
//
// Small, category-diverse fixture set for the game client's dev database.
// The bar-exam track dominates real sheets, so it is thinned per category
// while the rarer exam tracks are carried whole.

use std::collections::HashMap;

use crate::config::options::SampleOptions;
use crate::question::{ChallengeType, QuestionRecord};

/// What the sampler decided, for the summary line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SamplePlan {
    pub majority: Option<ChallengeType>,
    pub categories: usize,
    pub per_category: usize,
    /// Records carried whole from the other tracks.
    pub minority_records: usize,
}

/// Most frequent challenge type; ties go to the one seen first.
fn majority_type(records: &[QuestionRecord]) -> Option<ChallengeType> {
    let mut order: Vec<(ChallengeType, usize)> = Vec::new();
    for r in records {
        match order.iter_mut().find(|(t, _)| *t == r.challenge_type) {
            Some((_, n)) => *n += 1,
            None => order.push((r.challenge_type, 1)),
        }
    }
    let mut best: Option<(ChallengeType, usize)> = None;
    for (t, n) in order {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((t, n));
        }
    }
    best.map(|(t, _)| t)
}

pub fn diverse_sample(records: &[QuestionRecord], opts: &SampleOptions) -> (Vec<QuestionRecord>, SamplePlan) {
    let Some(majority) = majority_type(records) else {
        return (vec![], SamplePlan::default());
    };

    // categories of the majority track, first-encounter order
    let mut cat_ix: HashMap<&str, usize> = HashMap::new();
    let mut by_cat: Vec<Vec<&QuestionRecord>> = Vec::new();
    for r in records.iter().filter(|r| r.challenge_type == majority) {
        let ix = *cat_ix.entry(r.category.as_str()).or_insert_with(|| {
            by_cat.push(Vec::new());
            by_cat.len() - 1
        });
        by_cat[ix].push(r);
    }

    let per_category = (opts.target / by_cat.len().max(1))
        .max(opts.min_per_category)
        .min(opts.max_per_category);

    let mut out: Vec<QuestionRecord> = Vec::new();
    let mut minority_records = 0;
    if opts.include_minority {
        for r in records.iter().filter(|r| r.challenge_type != majority) {
            out.push(r.clone());
            minority_records += 1;
        }
    }
    for group in &by_cat {
        out.extend(group.iter().take(per_category).map(|r| (*r).clone()));
    }

    logf!(
        "sample: {} majority categories x {} + {} other-track records = {}",
        by_cat.len(),
        per_category,
        minority_records,
        out.len()
    );
    let plan = SamplePlan { majority: Some(majority), categories: by_cat.len(), per_category, minority_records };
    (out, plan)
}
