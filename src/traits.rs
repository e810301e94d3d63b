//! Provide traits for the estimators
//!
//! Every estimator comes as a pair of types: a hyperparameter set implementing [`Fit`] and the
//! fitted model it produces, implementing [`Predict`]. Because `fit` borrows the hyperparameters
//! and returns a brand new model, fitting twice never merges state and the hyperparameter set can
//! be handed to the evaluation harness as the factory for one fresh model per fold.

use ndarray::Array1;

use crate::dataset::{Float, ItemId, RatingsView, UserId};

/// Fittable algorithms
///
/// A fittable algorithm takes a view of ratings and creates a concept of some kind about it. The
/// error type `E` is specific to the algorithm and has to be convertible from the crate's own
/// [`Error`](crate::Error), so fold and dataset failures can travel through it.
pub trait Fit<F: Float, E: std::error::Error + From<crate::error::Error>> {
    type Object: Predict<F>;

    fn fit(&self, dataset: &RatingsView<F>) -> Result<Self::Object, E>;
}

/// Predict a rating for a (user, item) pair
///
/// Fitted models answer every query, including identifiers they never saw during fitting. How
/// unseen identifiers are handled is documented on each model.
pub trait Predict<F: Float> {
    /// Estimate the rating `user` gives to `item`
    fn predict(&self, user: UserId, item: ItemId) -> F;

    /// Estimate the ratings of many (user, item) pairs, one output per pair and in the same
    /// order
    fn predict_many(&self, pairs: &[(UserId, ItemId)]) -> Array1<F> {
        pairs
            .iter()
            .map(|&(user, item)| self.predict(user, item))
            .collect()
    }
}
