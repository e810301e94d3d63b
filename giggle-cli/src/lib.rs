//! Command line side of `giggle`
//!
//! The estimators of the workspace are a closed set, so they are gathered in the
//! [`Recommender`] enum and addressed by short keys (`gaussian`, `beta`, `baseline`, `neigh`).
//! A [`Recommender`] is fitted like any other hyper-parameter set and yields a
//! [`FittedRecommender`], which [`persistence`] stores on disk.
pub mod persistence;
mod registry;

pub use registry::{FittedRecommender, Recommender, RecommenderError, Result};
