use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::ModelsArgs;
use crate::commands::cv_label;
use crate::engine::{self, RecordFilter};
use crate::model::GroupSummary;
use crate::parse;
use crate::report::{self, Report};

#[derive(Debug, Serialize)]
struct ModelsView {
    sort: &'static str,
    models: Vec<GroupSummary>,
}

pub fn run(args: ModelsArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let keys = engine::distinct_keys(&records, |record| record.test_model.as_str());
    let models = engine::summarize_groups(
        &filtered,
        &keys,
        |record| record.test_model.as_str(),
        args.sort,
    );

    info!(
        record_count = records.len(),
        filtered_count = filtered.len(),
        model_count = models.len(),
        sort = args.sort.as_str(),
        "model leaderboard computed"
    );

    let view = ModelsView {
        sort: args.sort.as_str(),
        models,
    };

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote models report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn write_text(view: &ModelsView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Models: {} (sort={})", view.models.len(), view.sort)?;
    writeln!(
        output,
        "{:<28} {:>5} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}  consistency",
        "model", "n", "mean", "std", "cv%", "min", "max", "range"
    )?;
    for summary in &view.models {
        writeln!(
            output,
            "{:<28} {:>5} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}  {}",
            summary.key,
            summary.n,
            summary.mean,
            summary.std,
            summary.cv,
            summary.min,
            summary.max,
            summary.range(),
            cv_label(summary.cv)
        )?;
    }

    output.flush()?;
    Ok(())
}
