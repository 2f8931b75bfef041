use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Invalid expert weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}
