//! giggle prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{
    Float, FoldSplitter, ItemId, Rating, RatingDataset, RatingIndex, RatingMatrix, RatingsView,
    UserId,
};

#[doc(no_inline)]
pub use crate::default_map::DefaultMap;

#[doc(no_inline)]
pub use crate::evaluation::{cross_validate, evaluate_fold, CrossValidation, FoldScore};

#[doc(no_inline)]
pub use crate::metrics_regression::Regression;

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;
