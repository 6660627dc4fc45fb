use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::DepthArgs;
use crate::engine::{self, RecordFilter};
use crate::model::DepthBucket;
use crate::parse;
use crate::report::{self, Report};

#[derive(Debug, Serialize)]
struct DepthView {
    correlation: f64,
    depths: Vec<DepthBucket>,
}

pub fn run(args: DepthArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let depths: Vec<f64> = filtered.iter().map(|record| record.depth as f64).collect();
    let scores: Vec<f64> = filtered
        .iter()
        .map(|record| record.alignment_score)
        .collect();

    let view = DepthView {
        correlation: engine::pearson(&depths, &scores),
        depths: engine::summarize_depths(&filtered, &records),
    };

    info!(
        record_count = records.len(),
        filtered_count = filtered.len(),
        depth_count = view.depths.len(),
        correlation = view.correlation,
        "depth analysis computed"
    );

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote depth report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn write_text(view: &DepthView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Alignment score by conversation depth (Pearson r={:.3})",
        view.correlation
    )?;
    writeln!(output, "{:>6} {:>5} {:>8} {:>8}", "depth", "n", "mean", "std")?;
    for bucket in &view.depths {
        writeln!(
            output,
            "{:>6} {:>5} {:>8.1} {:>8.1}",
            bucket.depth, bucket.n, bucket.mean, bucket.std
        )?;
    }

    output.flush()?;
    Ok(())
}
