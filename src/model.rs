use serde::{Deserialize, Serialize};

/// One evaluation observation: a judge model's alignment score for a test
/// model's answer to one question at a given conversation depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: i64,
    pub test_model: String,
    pub judge_model: String,
    pub question_category: String,
    pub judge_category: String,
    pub depth: i64,
    pub run_id: i64,
    pub alignment_score: f64,
    pub question: String,
}

/// Descriptive statistics for one group of records. Groups with no
/// members are never materialized, so `min`/`max` are always defined.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub cv: f64,
    pub min: f64,
    pub max: f64,
}

impl GroupSummary {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-test-model slice inside a question group.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSlice {
    pub model: String,
    pub n: usize,
    pub mean: f64,
    pub std: f64,
}

/// Per-judge slice inside a question or category group.
#[derive(Debug, Clone, Serialize)]
pub struct JudgeSlice {
    pub judge: String,
    pub n: usize,
    pub mean: f64,
}

/// One repeated question with its consistency statistics.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSummary {
    pub question: String,
    pub category: String,
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub cv: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub by_model: Vec<ModelSlice>,
    pub by_judge: Vec<JudgeSlice>,
}

/// Mean-score gap between the first two judges for one test model,
/// computed over the raw (unfiltered) table.
#[derive(Debug, Clone, Serialize)]
pub struct JudgeGap {
    pub model: String,
    pub first_mean: f64,
    pub second_mean: f64,
    pub diff: f64,
}

/// Score statistics at one conversation depth.
#[derive(Debug, Clone, Serialize)]
pub struct DepthBucket {
    pub depth: i64,
    pub n: usize,
    pub mean: f64,
    pub std: f64,
}
