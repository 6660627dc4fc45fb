use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::OverviewArgs;
use crate::engine::{self, RecordFilter};
use crate::parse;
use crate::report::{self, Report};

#[derive(Debug, Serialize)]
struct OverviewView {
    record_count: usize,
    filtered_count: usize,
    model_count: usize,
    judge_count: usize,
    category_count: usize,
    mean: f64,
    std: f64,
    judge_gap: Option<JudgeGapSummary>,
    depth_correlation: f64,
}

#[derive(Debug, Serialize)]
struct JudgeGapSummary {
    first_judge: String,
    second_judge: String,
    first_mean: f64,
    second_mean: f64,
    gap: f64,
}

pub fn run(args: OverviewArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let scores: Vec<f64> = filtered
        .iter()
        .map(|record| record.alignment_score)
        .collect();
    let depths: Vec<f64> = filtered.iter().map(|record| record.depth as f64).collect();

    let judges = engine::distinct_keys(&records, |record| record.judge_model.as_str());
    let judge_summaries = engine::group_scores(&filtered, &judges, |record| {
        record.judge_model.as_str()
    });

    let judge_gap = (judge_summaries.len() >= 2).then(|| {
        let first = &judge_summaries[0];
        let second = &judge_summaries[1];
        JudgeGapSummary {
            first_judge: first.key.clone(),
            second_judge: second.key.clone(),
            first_mean: first.mean,
            second_mean: second.mean,
            gap: (first.mean - second.mean).abs(),
        }
    });

    let view = OverviewView {
        record_count: records.len(),
        filtered_count: filtered.len(),
        model_count: engine::distinct_keys(&records, |record| record.test_model.as_str()).len(),
        judge_count: judges.len(),
        category_count: engine::distinct_keys(&records, |record| {
            record.question_category.as_str()
        })
        .len(),
        mean: engine::mean(&scores),
        std: engine::population_std(&scores),
        judge_gap,
        depth_correlation: engine::pearson(&depths, &scores),
    };

    info!(
        record_count = view.record_count,
        filtered_count = view.filtered_count,
        "overview computed"
    );

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote overview report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn write_text(view: &OverviewView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Records: {} total, {} after filters",
        view.record_count, view.filtered_count
    )?;
    writeln!(
        output,
        "Distinct: {} test models, {} judges, {} categories",
        view.model_count, view.judge_count, view.category_count
    )?;
    writeln!(
        output,
        "Overall score: mean={:.1} std={:.1}",
        view.mean, view.std
    )?;
    match &view.judge_gap {
        Some(gap) => writeln!(
            output,
            "Judge gap: {} ({:.1}) vs {} ({:.1}) -> {:.1} pts",
            gap.first_judge, gap.first_mean, gap.second_judge, gap.second_mean, gap.gap
        )?,
        None => writeln!(output, "Judge gap: n/a (fewer than 2 judges)")?,
    }
    writeln!(
        output,
        "Depth correlation: r={:.3}",
        view.depth_correlation
    )?;

    output.flush()?;
    Ok(())
}
