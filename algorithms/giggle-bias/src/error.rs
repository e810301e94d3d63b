use thiserror::Error;

pub type Result<T> = std::result::Result<T, BiasError>;

#[derive(Error, Debug, Clone)]
pub enum BiasError {
    #[error("number of epochs must be bigger than 0")]
    InvalidEpochs,
    #[error("check period must be bigger than 0")]
    InvalidCheckPeriod,
    #[error("learning rate should be positive and finite, but is {0}")]
    InvalidLearningRate(f32),
    #[error("regularization should be non-negative and finite, but is {0}")]
    InvalidRegularization(f32),
    #[error("tolerance should be non-negative and finite, but is {0}")]
    InvalidTolerance(f32),
    #[error(transparent)]
    BaseCrate(#[from] giggle::Error),
}
