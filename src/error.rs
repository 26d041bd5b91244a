use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid axis length: {0}")]
    InvalidAxisLength(f64),

    #[error("invalid break size: {0} (expected finite value in [0, 1])")]
    InvalidBreakSize(f64),

    #[error("unknown axis break kind: {0}")]
    UnknownBreakKind(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
