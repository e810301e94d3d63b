//! # Bias model
//!
//! `giggle-bias` estimates a rating as the training mean plus a learned offset for the user and
//! one for the item:
//!
//! ```text
//! r̂(u, i) = μ + b_u + b_i
//! ```
//!
//! The offsets are trained with plain stochastic gradient descent over the training rows and L2
//! shrinkage towards zero. Training stops after a fixed number of epochs or as soon as the
//! training error, measured at a fixed period of updates, stops improving.
//!
//! ## Example
//!
//! ```rust
//! use giggle::prelude::*;
//! use giggle_bias::BiasSgd;
//!
//! let ratings = vec![
//!     Rating::new(1, 1, 5.0),
//!     Rating::new(1, 2, 3.0),
//!     Rating::new(2, 1, 4.0),
//!     Rating::new(2, 2, 2.0),
//! ];
//! let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
//!
//! let model = BiasSgd::params().epochs(10).fit(&dataset.view()).unwrap();
//! assert!(model.predict(1, 1) > model.predict(2, 2));
//! ```
mod algorithm;
mod error;
mod hyperparams;

pub use algorithm::BiasSgd;
pub use error::{BiasError, Result};
pub use hyperparams::{BiasSgdParams, BiasSgdValidParams};
