//! Error types in giggle
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("at least two folds are needed, but {0} were requested")]
    InvalidFoldCount(usize),
    #[error("fold {index} is out of range for {nfolds} folds")]
    FoldOutOfRange { index: usize, nfolds: usize },
    #[error("not enough samples: need at least {needed}, got {got}")]
    NotEnoughSamples { needed: usize, got: usize },
    #[error("algorithm not converged {0}")]
    NotConverged(String),
}
