use thiserror::Error;

pub type Result<T> = std::result::Result<T, NeighborsError>;

#[derive(Error, Debug, Clone)]
pub enum NeighborsError {
    #[error("number of neighbours must be bigger than 0")]
    InvalidNeighbors,
    #[error("minimal support must be at least 2, but is {0}")]
    InvalidSupport(usize),
    #[error(transparent)]
    BaseCrate(#[from] giggle::Error),
}
