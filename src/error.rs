use thiserror::Error;

/// Convenience result type for summarization.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Conditions that stop a dataset from being summarized.
///
/// Unparseable numbers, rows missing a group-by column and empty categorical
/// columns are not errors; they show up in the shape of the summary instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// The dataset has no rows, so there is nothing to classify.
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// A column was summarized as numeric although none of its values parse.
    #[error("column '{column}' has no numeric values to summarize")]
    NoNumericValues { column: String },
}
