use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::QuestionsArgs;
use crate::commands::cv_label;
use crate::engine::{QuestionOptions, RecordFilter, summarize_questions};
use crate::model::QuestionSummary;
use crate::parse;
use crate::report::{self, Report};

const DISPLAY_TEXT_MAX_CHARS: usize = 120;

#[derive(Debug, Serialize)]
struct QuestionsView {
    min_count: usize,
    sort: &'static str,
    search: Option<String>,
    questions: Vec<QuestionSummary>,
}

pub fn run(args: QuestionsArgs) -> Result<()> {
    let records = parse::load_records(&args.csv_path)?;
    let filter = RecordFilter::new(args.judge, args.category, args.models);
    let filtered = filter.apply(&records);

    let opts = QuestionOptions {
        min_count: args.min_count,
        search: args.search.clone(),
        sort: args.sort,
    };
    let questions = summarize_questions(&filtered, &opts)?;

    info!(
        record_count = records.len(),
        filtered_count = filtered.len(),
        question_count = questions.len(),
        min_count = args.min_count,
        sort = args.sort.as_str(),
        "question consistency computed"
    );

    let view = QuestionsView {
        min_count: args.min_count,
        sort: args.sort.as_str(),
        search: args.search,
        questions,
    };

    if let Some(out) = &args.out {
        let report = Report::new(&args.csv_path, records.len(), filtered.len(), &view)?;
        report::write_report(out, &report)?;
        info!(path = %out.display(), "wrote questions report");
        return Ok(());
    }

    if args.json {
        return report::print_json(&view);
    }

    write_text(&view)
}

fn write_text(view: &QuestionsView) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Questions: {} (min_count={} sort={})",
        view.questions.len(),
        view.min_count,
        view.sort
    )?;
    if view.questions.is_empty() {
        let qualifier = match &view.search {
            Some(query) => format!(" matching \"{query}\""),
            None => String::new(),
        };
        writeln!(
            output,
            "No questions found with {}+ occurrences{qualifier}",
            view.min_count
        )?;
        output.flush()?;
        return Ok(());
    }

    for (rank, question) in view.questions.iter().enumerate() {
        writeln!(
            output,
            "{}.\t[{}] n={} mean={:.1} std={:.1} cv={:.1}% ({}) range={:.1}",
            rank + 1,
            question.category,
            question.n,
            question.mean,
            question.std,
            question.cv,
            cv_label(question.cv),
            question.range
        )?;
        writeln!(output, "\t{}", truncate_display(&question.question))?;
        for slice in &question.by_model {
            writeln!(
                output,
                "\tmodel {:<24} mean={:.1} std={:.1} (n={})",
                slice.model, slice.mean, slice.std, slice.n
            )?;
        }
        for slice in &question.by_judge {
            writeln!(
                output,
                "\tjudge {:<24} mean={:.1} (n={})",
                slice.judge, slice.mean, slice.n
            )?;
        }
    }

    output.flush()?;
    Ok(())
}

fn truncate_display(text: &str) -> String {
    if text.chars().count() <= DISPLAY_TEXT_MAX_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(DISPLAY_TEXT_MAX_CHARS).collect();
    format!("{truncated}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let short = "What is happiness?";
        assert_eq!(truncate_display(short), short);

        let long = "é".repeat(200);
        let truncated = truncate_display(&long);
        assert_eq!(truncated.chars().count(), DISPLAY_TEXT_MAX_CHARS + 1);
        assert!(truncated.ends_with('…'));
    }
}
