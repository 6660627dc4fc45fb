mod filter;
mod group;
mod question;
mod scalar;

pub use filter::RecordFilter;
pub use group::{
    distinct_keys, group_scores, judge_gap_by_model, judge_slices, summarize_depths,
    summarize_groups,
};
pub use question::{QuestionOptions, summarize_questions};
pub use scalar::{cv_percent, mean, pearson, population_std};
