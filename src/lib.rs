//! `giggle` estimates how much a user will like a joke from a sparse user × joke rating table,
//! and measures how good those estimates are with k-fold cross-validation.
//!
//! ## The Big Picture
//!
//! This crate holds the shared vocabulary of the workspace: ratings and the datasets built from
//! them, the deterministic fold assignment, the dense rating matrix, the [`Fit`](traits::Fit) and
//! [`Predict`](traits::Predict) traits every estimator implements and the evaluation harness that
//! drives them. The estimators themselves live in their own crates:
//!
//! * `giggle-baselines`: identity-blind Gaussian and Beta samplers
//! * `giggle-bias`: additive user/item bias model trained by stochastic gradient descent
//! * `giggle-neighbors`: item-to-item neighbourhood model on co-rated Pearson correlation
//!
//! ## Example
//!
//! ```rust
//! use giggle::prelude::*;
//!
//! let ratings = vec![
//!     Rating::new(1, 1, 5.0),
//!     Rating::new(1, 2, 3.0),
//!     Rating::new(2, 1, 4.0),
//!     Rating::new(2, 2, 2.0),
//! ];
//! let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
//!
//! let (train, test) = dataset.load_fold(0).unwrap();
//! assert_eq!(train.len() + test.len(), dataset.nratings());
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod default_map;
pub mod error;
pub mod evaluation;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{
    Float, FoldSplitter, ItemId, Rating, RatingDataset, RatingIndex, RatingMatrix, RatingsView,
    UserId,
};
pub use default_map::DefaultMap;
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
