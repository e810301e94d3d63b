use thiserror::Error;

/// Result type of the baseline samplers
pub type Result<T> = std::result::Result<T, BaselineError>;

#[derive(Error, Debug, Clone)]
pub enum BaselineError {
    #[error("support margin should be positive and finite, but is {0}")]
    InvalidEpsilon(f32),
    #[error("tolerance should be positive and finite, but is {0}")]
    InvalidTolerance(f32),
    #[error("maximal number of iterations must be bigger than 0")]
    InvalidMaxIterations,
    #[error("beta shape estimate did not converge after {0} iterations")]
    NotConverged(usize),
    #[error(transparent)]
    BaseCrate(#[from] giggle::Error),
}
