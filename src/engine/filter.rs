use std::collections::HashSet;

use crate::model::EvaluationRecord;

/// Sentinel filter value meaning "no restriction".
pub const ALL: &str = "All";

/// Judge, category, and model-inclusion predicates applied to the raw
/// table before every aggregation. An empty model set leaves every model
/// active, so the no-selection state shows everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    judge: Option<String>,
    category: Option<String>,
    models: HashSet<String>,
}

impl RecordFilter {
    pub fn new(judge: Option<String>, category: Option<String>, models: Vec<String>) -> Self {
        Self {
            judge: judge.filter(|value| value != ALL),
            category: category.filter(|value| value != ALL),
            models: models.into_iter().collect(),
        }
    }

    pub fn matches(&self, record: &EvaluationRecord) -> bool {
        if let Some(judge) = &self.judge {
            if record.judge_model != *judge {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if record.question_category != *category {
                return false;
            }
        }
        self.models.is_empty() || self.models.contains(&record.test_model)
    }

    pub fn apply<'a>(&self, records: &'a [EvaluationRecord]) -> Vec<&'a EvaluationRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}
