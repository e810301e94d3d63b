//! # Distributional baselines
//!
//! `giggle-baselines` provides two estimators that ignore who rates which joke. They model the
//! distribution of all training ratings and answer every query with a random draw from it, which
//! makes them the floor any personalised estimator has to beat.
//!
//! * [`GaussianBaseline`]: normal distribution with the sample mean and standard deviation
//! * [`BetaBaseline`]: Beta distribution on the observed rating range, widened by a small margin
//!
//! Both draw from a generator seeded with a stored seed (`1337` by default) on every call.
//!
//! ## Example
//!
//! ```rust
//! use giggle::prelude::*;
//! use giggle_baselines::{GaussianBaseline, GaussianParams};
//!
//! let ratings = (0..10u32).map(|i| Rating::new(i, i % 3, i as f64)).collect();
//! let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
//!
//! let model: GaussianBaseline<f64> = GaussianParams::new().fit(&dataset.view()).unwrap();
//! let pairs = [(1, 1), (2, 2)];
//! assert_eq!(model.predict_many(&pairs), model.predict_many(&pairs));
//! ```
mod beta;
mod error;
mod gaussian;
mod hyperparams;

pub use beta::BetaBaseline;
pub use error::{BaselineError, Result};
pub use gaussian::GaussianBaseline;
pub use hyperparams::{BetaParams, BetaValidParams, GaussianParams, GaussianValidParams};
