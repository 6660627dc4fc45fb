use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "judgestat",
    version,
    about = "Judge-consistency analytics over LLM evaluation CSVs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Overview(OverviewArgs),
    Models(ModelsArgs),
    Judges(JudgesArgs),
    Categories(CategoriesArgs),
    Depth(DepthArgs),
    Questions(QuestionsArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GroupSort {
    MeanDesc,
    MeanAsc,
    CvAsc,
    CvDesc,
}

impl GroupSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MeanDesc => "mean-desc",
            Self::MeanAsc => "mean-asc",
            Self::CvAsc => "cv-asc",
            Self::CvDesc => "cv-desc",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum QuestionSort {
    CvDesc,
    CvAsc,
    MeanDesc,
    MeanAsc,
    CountDesc,
}

impl QuestionSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CvDesc => "cv-desc",
            Self::CvAsc => "cv-asc",
            Self::MeanDesc => "mean-desc",
            Self::MeanAsc => "mean-asc",
            Self::CountDesc => "count-desc",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ModelsArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, value_enum, default_value_t = GroupSort::MeanDesc)]
    pub sort: GroupSort,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct JudgesArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, value_enum, default_value_t = GroupSort::MeanDesc)]
    pub sort: GroupSort,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DepthArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct QuestionsArgs {
    #[arg(long)]
    pub csv_path: PathBuf,

    #[arg(long)]
    pub judge: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long = "model")]
    pub models: Vec<String>,

    #[arg(long, default_value_t = 2)]
    pub min_count: usize,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t = QuestionSort::CvDesc)]
    pub sort: QuestionSort,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}
