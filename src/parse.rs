use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::model::EvaluationRecord;

/// Loads evaluation records from a CSV file.
///
/// Column names are matched case-sensitively, camelCase first with a
/// snake_case fallback (`testModel`/`test_model`, ...). Rows without a
/// test model are dropped; every other field coerces to a documented
/// default when absent or unparseable: `id` to the row index, `depth`
/// to 1, `run_id` to 0, `alignment_score` to 0.0 (zero is a valid
/// observed score, so the row is kept).
pub fn load_records(path: &Path) -> Result<Vec<EvaluationRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let records = records_from_reader(file)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    info!(
        path = %path.display(),
        record_count = records.len(),
        "loaded evaluation records"
    );
    Ok(records)
}

pub fn records_from_reader<R: io::Read>(reader: R) -> Result<Vec<EvaluationRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("failed to read csv header row")?
        .clone();
    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();

    let mut records = Vec::new();
    let mut dropped = 0_usize;
    for (row_index, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to read csv row {}", row_index + 1))?;

        let test_model = field(&row, &columns, &["testModel", "test_model"]);
        if test_model.is_empty() {
            dropped += 1;
            continue;
        }

        records.push(EvaluationRecord {
            id: parse_integer(field(&row, &columns, &["id"])).unwrap_or(row_index as i64),
            test_model: test_model.to_string(),
            judge_model: field(&row, &columns, &["judgeModel", "judge_model"]).to_string(),
            question_category: field(&row, &columns, &["questionCategory", "question_category"])
                .to_string(),
            judge_category: field(&row, &columns, &["judgeCategory", "judge_category"])
                .to_string(),
            depth: parse_integer(field(&row, &columns, &["depth"]))
                .filter(|depth| *depth >= 1)
                .unwrap_or(1),
            run_id: parse_integer(field(&row, &columns, &["runId", "run_id"])).unwrap_or(0),
            alignment_score: field(&row, &columns, &["alignment_score"])
                .parse::<f64>()
                .unwrap_or(0.0),
            question: field(&row, &columns, &["question"]).to_string(),
        });
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows without a test model");
    }
    Ok(records)
}

/// First non-empty value among the given column names; empty string when
/// every candidate is missing or blank.
fn field<'r>(
    row: &'r csv::StringRecord,
    columns: &HashMap<&str, usize>,
    names: &[&str],
) -> &'r str {
    for name in names {
        if let Some(&column) = columns.get(name) {
            if let Some(value) = row.get(column) {
                if !value.is_empty() {
                    return value;
                }
            }
        }
    }
    ""
}

fn parse_integer(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Vec<EvaluationRecord> {
        records_from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn camel_case_and_snake_case_headers_parse_identically() {
        let camel = load(
            "id,testModel,judgeModel,questionCategory,judgeCategory,depth,runId,alignment_score,question\n\
             7,A,J1,C,JC,2,3,85.5,Q1\n",
        );
        let snake = load(
            "id,test_model,judge_model,question_category,judge_category,depth,run_id,alignment_score,question\n\
             7,A,J1,C,JC,2,3,85.5,Q1\n",
        );

        assert_eq!(camel.len(), 1);
        assert_eq!(snake.len(), 1);
        for record in [&camel[0], &snake[0]] {
            assert_eq!(record.id, 7);
            assert_eq!(record.test_model, "A");
            assert_eq!(record.judge_model, "J1");
            assert_eq!(record.question_category, "C");
            assert_eq!(record.judge_category, "JC");
            assert_eq!(record.depth, 2);
            assert_eq!(record.run_id, 3);
            assert_eq!(record.alignment_score, 85.5);
            assert_eq!(record.question, "Q1");
        }
    }

    #[test]
    fn rows_without_test_model_are_dropped() {
        let records = load(
            "testModel,alignment_score\n\
             A,80\n\
             ,60\n\
             B,70\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test_model, "A");
        assert_eq!(records[1].test_model, "B");
    }

    #[test]
    fn header_only_input_yields_no_records() {
        assert!(load("testModel,alignment_score\n").is_empty());
    }

    #[test]
    fn unparseable_numeric_fields_coerce_to_defaults() {
        let records = load(
            "id,testModel,depth,runId,alignment_score,question\n\
             x,A,deep,run,oops,Q1\n",
        );
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, 0); // row index
        assert_eq!(record.depth, 1);
        assert_eq!(record.run_id, 0);
        assert_eq!(record.alignment_score, 0.0);
    }

    #[test]
    fn absent_columns_coerce_to_defaults() {
        let records = load("testModel,alignment_score\nA,80\nB,60\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 1); // row index default
        assert_eq!(records[1].depth, 1);
        assert_eq!(records[1].run_id, 0);
        assert_eq!(records[1].judge_model, "");
        assert_eq!(records[1].question, "");
    }

    #[test]
    fn depth_below_one_coerces_to_one() {
        let records = load("testModel,depth,alignment_score\nA,0,80\nB,-2,60\nC,4,70\n");
        assert_eq!(records[0].depth, 1);
        assert_eq!(records[1].depth, 1);
        assert_eq!(records[2].depth, 4);
    }

    #[test]
    fn parsed_zero_id_and_run_id_are_kept() {
        let records = load("id,testModel,runId,alignment_score\n0,A,0,80\n");
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].run_id, 0);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let records = load(
            "testModel,alignment_score,question\n\
             A,80,\"What, exactly, is happiness?\"\n",
        );
        assert_eq!(records[0].question, "What, exactly, is happiness?");
    }

    #[test]
    fn short_rows_are_tolerated() {
        let records = load("testModel,judgeModel,alignment_score\nA\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].judge_model, "");
        assert_eq!(records[0].alignment_score, 0.0);
    }
}
