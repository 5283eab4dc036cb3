//! Breakdowns of a selection by DOK level, question type and topic.

use std::collections::BTreeMap;

use crate::question::{format_question_type, Question};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Questions that carry the analysed field.
    pub total: usize,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: usize,
    /// Share of `total`, rounded to one decimal place.
    pub percentage: f64,
}

/// Counts by DOK level, lowest level first.
pub fn dok_analysis(questions: &[&Question]) -> Analysis {
    let mut counts = BTreeMap::<u8, usize>::new();
    for dok in questions.iter().filter_map(|q| q.dok) {
        *counts.entry(dok).or_default() += 1;
    }

    Analysis::from_counts(
        counts
            .into_iter()
            .map(|(dok, count)| (dok.to_string(), count))
            .collect(),
    )
}

/// Counts by formatted question type, in order of first appearance.
pub fn type_analysis(questions: &[&Question]) -> Analysis {
    count_labels(
        questions
            .iter()
            .filter_map(|q| q.question_type.as_deref())
            .filter(|t| !t.is_empty())
            .map(|t| format_question_type(Some(t))),
    )
}

/// Counts by topic, in order of first appearance.
pub fn topic_analysis(questions: &[&Question]) -> Analysis {
    count_labels(
        questions
            .iter()
            .filter_map(|q| q.topic_title())
            .map(str::to_owned),
    )
}

fn count_labels(labels: impl Iterator<Item = String>) -> Analysis {
    let mut counts = Vec::<(String, usize)>::new();
    for label in labels {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    Analysis::from_counts(counts)
}

impl Analysis {
    fn from_counts(counts: Vec<(String, usize)>) -> Self {
        let total = counts.iter().map(|(_, count)| count).sum();
        let breakdown = counts
            .into_iter()
            .map(|(label, count)| BreakdownEntry {
                label,
                count,
                percentage: percentage(count, total),
            })
            .collect();
        Self { total, breakdown }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}
