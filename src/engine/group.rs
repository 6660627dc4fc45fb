use std::cmp::Ordering;
use std::collections::HashSet;

use crate::cli::GroupSort;
use crate::engine::scalar::{cv_percent, mean, population_std};
use crate::model::{DepthBucket, EvaluationRecord, GroupSummary, JudgeGap, JudgeSlice};

/// Distinct key values in first-appearance order. Keys are taken from the
/// raw table, not the filtered one, so the key universe stays stable
/// across filter changes.
pub fn distinct_keys<F>(records: &[EvaluationRecord], key_of: F) -> Vec<String>
where
    F: Fn(&EvaluationRecord) -> &str,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for record in records {
        let key = key_of(record);
        if seen.insert(key.to_string()) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Per-key score statistics over the filtered records, in key order.
/// Keys whose score subsequence is empty are dropped before min/max is
/// ever computed; no `n == 0` summary escapes this function.
pub fn group_scores<F>(
    filtered: &[&EvaluationRecord],
    keys: &[String],
    key_of: F,
) -> Vec<GroupSummary>
where
    F: Fn(&EvaluationRecord) -> &str,
{
    let mut groups = Vec::with_capacity(keys.len());
    for key in keys {
        let scores: Vec<f64> = filtered
            .iter()
            .copied()
            .filter(|record| key_of(record) == key)
            .map(|record| record.alignment_score)
            .collect();

        if scores.is_empty() {
            continue;
        }

        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        groups.push(GroupSummary {
            key: key.clone(),
            n: scores.len(),
            mean: mean(&scores),
            std: population_std(&scores),
            cv: cv_percent(&scores),
            min,
            max,
        });
    }
    groups
}

/// `group_scores` plus a consumer-specified ordering. The sort is stable:
/// groups with an equal sort key keep their relative input order.
pub fn summarize_groups<F>(
    filtered: &[&EvaluationRecord],
    keys: &[String],
    key_of: F,
    sort: GroupSort,
) -> Vec<GroupSummary>
where
    F: Fn(&EvaluationRecord) -> &str,
{
    let mut groups = group_scores(filtered, keys, key_of);
    match sort {
        GroupSort::MeanDesc => groups.sort_by(|a, b| compare_f64(b.mean, a.mean)),
        GroupSort::MeanAsc => groups.sort_by(|a, b| compare_f64(a.mean, b.mean)),
        GroupSort::CvAsc => groups.sort_by(|a, b| compare_f64(a.cv, b.cv)),
        GroupSort::CvDesc => groups.sort_by(|a, b| compare_f64(b.cv, a.cv)),
    }
    groups
}

/// Mean/count per judge over one slice of records, in the given judge
/// order. Judges without scores in the slice are omitted.
pub fn judge_slices(rows: &[&EvaluationRecord], judges: &[String]) -> Vec<JudgeSlice> {
    let mut slices = Vec::new();
    for judge in judges {
        let scores: Vec<f64> = rows
            .iter()
            .filter(|record| record.judge_model == *judge)
            .map(|record| record.alignment_score)
            .collect();

        if scores.is_empty() {
            continue;
        }

        slices.push(JudgeSlice {
            judge: judge.clone(),
            n: scores.len(),
            mean: mean(&scores),
        });
    }
    slices
}

/// Between-judge mean-score gap per test model, over the raw table, for
/// the first two distinct judges. Models lacking scores from either judge
/// are skipped. Sorted by gap, largest first.
pub fn judge_gap_by_model(records: &[EvaluationRecord]) -> Vec<JudgeGap> {
    let judges = distinct_keys(records, |record| record.judge_model.as_str());
    if judges.len() < 2 {
        return Vec::new();
    }
    let first = &judges[0];
    let second = &judges[1];

    let mut gaps = Vec::new();
    for model in distinct_keys(records, |record| record.test_model.as_str()) {
        let scores_for = |judge: &str| -> Vec<f64> {
            records
                .iter()
                .filter(|record| record.test_model == model && record.judge_model == judge)
                .map(|record| record.alignment_score)
                .collect()
        };

        let first_scores = scores_for(first);
        let second_scores = scores_for(second);
        if first_scores.is_empty() || second_scores.is_empty() {
            continue;
        }

        let first_mean = mean(&first_scores);
        let second_mean = mean(&second_scores);
        gaps.push(JudgeGap {
            model,
            first_mean,
            second_mean,
            diff: (first_mean - second_mean).abs(),
        });
    }

    gaps.sort_by(|a, b| compare_f64(b.diff, a.diff));
    gaps
}

/// Score statistics per conversation depth, ascending. Depths come from
/// the raw table; depths with no filtered scores are omitted.
pub fn summarize_depths(
    filtered: &[&EvaluationRecord],
    records: &[EvaluationRecord],
) -> Vec<DepthBucket> {
    let mut depths: Vec<i64> = records.iter().map(|record| record.depth).collect();
    depths.sort_unstable();
    depths.dedup();

    let mut buckets = Vec::new();
    for depth in depths {
        let scores: Vec<f64> = filtered
            .iter()
            .filter(|record| record.depth == depth)
            .map(|record| record.alignment_score)
            .collect();

        if scores.is_empty() {
            continue;
        }

        buckets.push(DepthBucket {
            depth,
            n: scores.len(),
            mean: mean(&scores),
            std: population_std(&scores),
        });
    }
    buckets
}

pub(super) fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
