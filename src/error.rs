use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Duplicate date in series: {0}")]
    DuplicateDate(NaiveDate),

    #[error("No usable rows after cleaning ({dropped} dropped for unparseable values)")]
    EmptySeries { dropped: usize },

    #[error("Forecast horizon of {0} days is outside the supported range 30..=365")]
    InvalidHorizon(u32),

    #[error("Insufficient history: {observed} observations, at least {required} required for seasonal fitting")]
    InsufficientHistory { observed: usize, required: usize },

    #[error("Singular design matrix: {0}")]
    SingularDesign(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
