use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::JudgesArgs;
use crate::engine::{self, RecordFilter};
use crate::model::GroupSummary;
use crate::parse;
use crate::report::{self, Report};

#[derive(Debug, Serialize)]
struct JudgesView {
    judges: Vec<GroupSummary>,
    gap_judges: Option<(String, String)>,
    gaps: Vec<JudgeGapRow>,
}

#[derive(Debug, Serialize)]
struct JudgeGapRow {
    model: String,
    first_mean: f64,
    second_mean: f64,
    diff: f64,
    consistency: &'static str,
}

pub fn run(args: JudgesArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let judge_keys = engine::distinct_keys(&records, |record| record.judge_model.as_str());
    // First-appearance order, like the key universe itself.
    let judges = engine::group_scores(&filtered, &judge_keys, |record| {
        record.judge_model.as_str()
    });

    // The between-judge gap is a property of the whole table, so it runs
    // on the raw records rather than the filtered view.
    let gaps: Vec<JudgeGapRow> = engine::judge_gap_by_model(&records)
        .into_iter()
        .map(|gap| JudgeGapRow {
            consistency: consistency_label(gap.diff),
            model: gap.model,
            first_mean: gap.first_mean,
            second_mean: gap.second_mean,
            diff: gap.diff,
        })
        .collect();

    let gap_judges =
        (judge_keys.len() >= 2).then(|| (judge_keys[0].clone(), judge_keys[1].clone()));

    info!(
        record_count = records.len(),
        filtered_count = filtered.len(),
        judge_count = judges.len(),
        gap_model_count = gaps.len(),
        "judge comparison computed"
    );

    let view = JudgesView {
        judges,
        gap_judges,
        gaps,
    };

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote judges report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn consistency_label(diff: f64) -> &'static str {
    if diff < 5.0 {
        "aligned"
    } else if diff < 10.0 {
        "moderate"
    } else {
        "divergent"
    }
}

fn write_text(view: &JudgesView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Judges: {}", view.judges.len())?;
    writeln!(
        output,
        "{:<28} {:>5} {:>8} {:>8} {:>8}",
        "judge", "n", "mean", "std", "cv%"
    )?;
    for judge in &view.judges {
        writeln!(
            output,
            "{:<28} {:>5} {:>8.1} {:>8.1} {:>8.1}",
            judge.key, judge.n, judge.mean, judge.std, judge.cv
        )?;
    }

    if let Some((first, second)) = &view.gap_judges {
        writeln!(output)?;
        writeln!(
            output,
            "Between-judge gap by model ({first} vs {second}):"
        )?;
        writeln!(
            output,
            "{:<28} {:>8} {:>8} {:>8}  consistency",
            "model", "first", "second", "|diff|"
        )?;
        for gap in &view.gaps {
            writeln!(
                output,
                "{:<28} {:>8.1} {:>8.1} {:>8.1}  {}",
                gap.model, gap.first_mean, gap.second_mean, gap.diff, gap.consistency
            )?;
        }
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_labels_follow_gap_thresholds() {
        assert_eq!(consistency_label(0.0), "aligned");
        assert_eq!(consistency_label(4.9), "aligned");
        assert_eq!(consistency_label(5.0), "moderate");
        assert_eq!(consistency_label(9.9), "moderate");
        assert_eq!(consistency_label(10.0), "divergent");
    }
}
