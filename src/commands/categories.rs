use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::CategoriesArgs;
use crate::engine::{self, RecordFilter};
use crate::model::{GroupSummary, JudgeSlice};
use crate::parse;
use crate::report::{self, Report};

#[derive(Debug, Serialize)]
struct CategoriesView {
    sort: &'static str,
    categories: Vec<CategoryRow>,
}

#[derive(Debug, Serialize)]
struct CategoryRow {
    summary: GroupSummary,
    by_judge: Vec<JudgeSlice>,
}

pub fn run(args: CategoriesArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let category_keys =
        engine::distinct_keys(&records, |record| record.question_category.as_str());
    let judges = engine::distinct_keys(&records, |record| record.judge_model.as_str());

    let summaries = engine::summarize_groups(
        &filtered,
        &category_keys,
        |record| record.question_category.as_str(),
        args.sort,
    );

    let categories: Vec<CategoryRow> = summaries
        .into_iter()
        .map(|summary| {
            let rows: Vec<&_> = filtered
                .iter()
                .copied()
                .filter(|record| record.question_category == summary.key)
                .collect();
            let by_judge = engine::judge_slices(&rows, &judges);
            CategoryRow { summary, by_judge }
        })
        .collect();

    info!(
        record_count = records.len(),
        filtered_count = filtered.len(),
        category_count = categories.len(),
        sort = args.sort.as_str(),
        "category summaries computed"
    );

    let view = CategoriesView {
        sort: args.sort.as_str(),
        categories,
    };

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote categories report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn write_text(view: &CategoriesView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Categories: {} (sort={})",
        view.categories.len(),
        view.sort
    )?;
    for row in &view.categories {
        let summary = &row.summary;
        writeln!(
            output,
            "{}  n={} mean={:.1} std={:.1} cv={:.1}%",
            summary.key, summary.n, summary.mean, summary.std, summary.cv
        )?;
        for slice in &row.by_judge {
            writeln!(
                output,
                "\tjudge {:<24} mean={:.1} (n={})",
                slice.judge, slice.mean, slice.n
            )?;
        }
        if row.by_judge.len() >= 2 {
            let delta = (row.by_judge[0].mean - row.by_judge[1].mean).abs();
            writeln!(output, "\tjudge delta: {delta:.1}")?;
        }
    }

    output.flush()?;
    Ok(())
}
