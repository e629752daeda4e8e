use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A checkpoint is not inside any group's range, so it has no place
    /// in the lap.
    #[error("checkpoint {0} is not covered by any checkpoint group")]
    UncoveredCheckpoint(usize),
}
