use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::QuestionSort;
use crate::engine::group::compare_f64;
use crate::engine::scalar::{cv_percent, mean, population_std};
use crate::model::{EvaluationRecord, JudgeSlice, ModelSlice, QuestionSummary};

pub struct QuestionOptions {
    pub min_count: usize,
    pub search: Option<String>,
    pub sort: QuestionSort,
}

/// Groups the filtered records by normalized question text and computes
/// per-question consistency statistics.
///
/// Normalization trims and collapses internal whitespace runs, so
/// cosmetic formatting differences do not fragment one logical question.
/// The display text kept for a group is the trimmed (not collapsed) text
/// of the first member encountered. Records with an empty question never
/// group; groups below `min_count` members are discarded.
pub fn summarize_questions(
    filtered: &[&EvaluationRecord],
    opts: &QuestionOptions,
) -> Result<Vec<QuestionSummary>> {
    let whitespace = Regex::new(r"\s+").context("failed to compile whitespace regex")?;

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (String, Vec<&EvaluationRecord>)> = HashMap::new();
    for &record in filtered {
        let key = normalize_question(&whitespace, &record.question);
        if key.is_empty() {
            continue;
        }
        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (record.question.trim().to_string(), Vec::new())
        });
        entry.1.push(record);
    }

    let query = opts.search.as_deref().map(str::to_lowercase);

    let mut summaries = Vec::new();
    for key in &order {
        let (display, rows) = &groups[key];
        if rows.len() < opts.min_count {
            continue;
        }
        if let Some(query) = &query {
            if !display.to_lowercase().contains(query.as_str()) {
                continue;
            }
        }
        summaries.push(summarize_one(display, rows));
    }

    match opts.sort {
        QuestionSort::CvDesc => summaries.sort_by(|a, b| compare_f64(b.cv, a.cv)),
        QuestionSort::CvAsc => summaries.sort_by(|a, b| compare_f64(a.cv, b.cv)),
        QuestionSort::MeanDesc => summaries.sort_by(|a, b| compare_f64(b.mean, a.mean)),
        QuestionSort::MeanAsc => summaries.sort_by(|a, b| compare_f64(a.mean, b.mean)),
        QuestionSort::CountDesc => summaries.sort_by(|a, b| b.n.cmp(&a.n)),
    }

    Ok(summaries)
}

pub(super) fn normalize_question(whitespace: &Regex, text: &str) -> String {
    whitespace.replace_all(text.trim(), " ").into_owned()
}

fn summarize_one(display: &str, rows: &[&EvaluationRecord]) -> QuestionSummary {
    let scores: Vec<f64> = rows.iter().map(|record| record.alignment_score).collect();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    QuestionSummary {
        question: display.to_string(),
        category: rows[0].question_category.clone(),
        n: rows.len(),
        mean: mean(&scores),
        std: population_std(&scores),
        cv: cv_percent(&scores),
        min,
        max,
        range: max - min,
        by_model: model_slices(rows),
        by_judge: judge_slices_in_order(rows),
    }
}

/// Per-model breakdown within one question group, sorted by mean
/// descending (stable on ties).
fn model_slices(rows: &[&EvaluationRecord]) -> Vec<ModelSlice> {
    let mut order: Vec<&str> = Vec::new();
    let mut scores_by_model: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in rows {
        scores_by_model
            .entry(record.test_model.as_str())
            .or_insert_with(|| {
                order.push(record.test_model.as_str());
                Vec::new()
            })
            .push(record.alignment_score);
    }

    let mut slices: Vec<ModelSlice> = order
        .iter()
        .map(|model| {
            let scores = &scores_by_model[model];
            ModelSlice {
                model: (*model).to_string(),
                n: scores.len(),
                mean: mean(scores),
                std: population_std(scores),
            }
        })
        .collect();

    slices.sort_by(|a, b| compare_f64(b.mean, a.mean));
    slices
}

/// Per-judge breakdown within one question group, in first-appearance
/// order.
fn judge_slices_in_order(rows: &[&EvaluationRecord]) -> Vec<JudgeSlice> {
    let mut order: Vec<&str> = Vec::new();
    let mut scores_by_judge: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in rows {
        scores_by_judge
            .entry(record.judge_model.as_str())
            .or_insert_with(|| {
                order.push(record.judge_model.as_str());
                Vec::new()
            })
            .push(record.alignment_score);
    }

    order
        .iter()
        .map(|judge| {
            let scores = &scores_by_judge[judge];
            JudgeSlice {
                judge: (*judge).to_string(),
                n: scores.len(),
                mean: mean(scores),
            }
        })
        .collect()
}
