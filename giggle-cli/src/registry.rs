use std::fmt;
use std::str::FromStr;

use giggle::traits::{Fit, Predict};
use giggle::{ItemId, ParamGuard, Rating, RatingIndex, RatingsView, UserId};
use giggle_baselines::{
    BaselineError, BetaBaseline, BetaParams, GaussianBaseline, GaussianParams,
};
use giggle_bias::{BiasError, BiasSgd, BiasSgdParams};
use giggle_datasets::DatasetError;
use giggle_neighbors::{ItemNeighborhood, ItemNeighborhoodParams, NeighborsError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, RecommenderError>;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("unknown recommender `{0}`, expected one of gaussian, beta, baseline, neigh")]
    UnknownKey(String),
    #[error("stored model is a `{found}` recommender, not `{expected}`")]
    KeyMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Baseline(#[from] BaselineError),
    #[error(transparent)]
    Bias(#[from] BiasError),
    #[error(transparent)]
    Neighbors(#[from] NeighborsError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("cannot encode or decode model: {0}")]
    Persistence(#[from] bincode::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    BaseCrate(#[from] giggle::Error),
}

/// Every estimator the command line knows, with its hyper-parameters
///
/// The variants are addressed by short keys: `gaussian`, `beta`, `baseline` and `neigh`.
/// [`Recommender::from_key`] gives each its default configuration, the bias model trains for 5
/// epochs with learning rate 0.01 and regularization 0.1.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommender {
    Gaussian(GaussianParams),
    Beta(BetaParams<f64>),
    Baseline(BiasSgdParams<f64>),
    Neighborhood(ItemNeighborhoodParams),
}

impl Recommender {
    pub const KEYS: [&'static str; 4] = ["gaussian", "beta", "baseline", "neigh"];

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "gaussian" => Ok(Recommender::Gaussian(GaussianParams::new())),
            "beta" => Ok(Recommender::Beta(BetaParams::new())),
            "baseline" => Ok(Recommender::Baseline(BiasSgdParams::new())),
            "neigh" => Ok(Recommender::Neighborhood(ItemNeighborhoodParams::new())),
            _ => Err(RecommenderError::UnknownKey(key.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Recommender::Gaussian(_) => "gaussian",
            Recommender::Beta(_) => "beta",
            Recommender::Baseline(_) => "baseline",
            Recommender::Neighborhood(_) => "neigh",
        }
    }

    /// Set the sampling seed of the distributional baselines, other variants are unchanged
    pub fn seed(self, seed: u64) -> Self {
        match self {
            Recommender::Gaussian(params) => Recommender::Gaussian(params.seed(seed)),
            Recommender::Beta(params) => Recommender::Beta(params.seed(seed)),
            other => other,
        }
    }
}

impl Recommender {
    /// Fit on every rating of `ratings`, without holding any of them out
    pub fn fit_ratings(&self, ratings: &[Rating<f64>]) -> Result<FittedRecommender> {
        let index = RatingIndex::from_ratings(ratings);
        self.fit(&RatingsView::new(ratings, &index))
    }
}

impl FromStr for Recommender {
    type Err = RecommenderError;

    fn from_str(key: &str) -> Result<Self> {
        Recommender::from_key(key)
    }
}

impl fmt::Display for Recommender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Fit<f64, RecommenderError> for Recommender {
    type Object = FittedRecommender;

    fn fit(&self, dataset: &RatingsView<f64>) -> Result<FittedRecommender> {
        debug!(recommender = self.key(), ratings = dataset.len(), "fitting");

        let fitted = match self {
            Recommender::Gaussian(params) => {
                FittedRecommender::Gaussian(params.check_ref()?.fit(dataset)?)
            }
            Recommender::Beta(params) => FittedRecommender::Beta(params.check_ref()?.fit(dataset)?),
            Recommender::Baseline(params) => {
                FittedRecommender::Baseline(params.check_ref()?.fit(dataset)?)
            }
            Recommender::Neighborhood(params) => {
                FittedRecommender::Neighborhood(params.check_ref()?.fit(dataset)?)
            }
        };

        Ok(fitted)
    }
}

/// A trained estimator of any variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedRecommender {
    Gaussian(GaussianBaseline<f64>),
    Beta(BetaBaseline<f64>),
    Baseline(BiasSgd<f64>),
    Neighborhood(ItemNeighborhood<f64>),
}

impl FittedRecommender {
    /// Key of the variant, the same as [`Recommender::key`] of the parameters that produced it
    pub fn key(&self) -> &'static str {
        match self {
            FittedRecommender::Gaussian(_) => "gaussian",
            FittedRecommender::Beta(_) => "beta",
            FittedRecommender::Baseline(_) => "baseline",
            FittedRecommender::Neighborhood(_) => "neigh",
        }
    }
}

impl Predict<f64> for FittedRecommender {
    fn predict(&self, user: UserId, item: ItemId) -> f64 {
        match self {
            FittedRecommender::Gaussian(model) => model.predict(user, item),
            FittedRecommender::Beta(model) => model.predict(user, item),
            FittedRecommender::Baseline(model) => model.predict(user, item),
            FittedRecommender::Neighborhood(model) => model.predict(user, item),
        }
    }

    fn predict_many(&self, pairs: &[(UserId, ItemId)]) -> Array1<f64> {
        match self {
            FittedRecommender::Gaussian(model) => model.predict_many(pairs),
            FittedRecommender::Beta(model) => model.predict_many(pairs),
            FittedRecommender::Baseline(model) => model.predict_many(pairs),
            FittedRecommender::Neighborhood(model) => model.predict_many(pairs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for key in Recommender::KEYS {
            let recommender: Recommender = key.parse().unwrap();
            assert_eq!(recommender.key(), key);
            assert_eq!(recommender.to_string(), key);
        }
    }

    #[test]
    fn unknown_key_fails() {
        let err = "svd".parse::<Recommender>().unwrap_err();
        assert!(matches!(err, RecommenderError::UnknownKey(ref key) if key == "svd"));
    }

    #[test]
    fn baseline_defaults() {
        match Recommender::from_key("baseline").unwrap() {
            Recommender::Baseline(params) => assert_eq!(params, BiasSgdParams::new()),
            other => panic!("unexpected variant {}", other),
        }
    }

    #[test]
    fn invalid_params_surface_per_family() {
        let ratings = vec![Rating::new(1, 1, 2.0), Rating::new(2, 1, 4.0)];

        let err = Recommender::Baseline(BiasSgdParams::new().epochs(0))
            .fit_ratings(&ratings)
            .unwrap_err();
        assert!(matches!(err, RecommenderError::Bias(BiasError::InvalidEpochs)));

        let err = Recommender::Neighborhood(ItemNeighborhoodParams::new().k(0))
            .fit_ratings(&ratings)
            .unwrap_err();
        assert!(matches!(
            err,
            RecommenderError::Neighbors(NeighborsError::InvalidNeighbors)
        ));

        let err = Recommender::from_key("beta")
            .unwrap()
            .fit_ratings(&[])
            .unwrap_err();
        assert!(matches!(
            err,
            RecommenderError::Baseline(BaselineError::BaseCrate(
                giggle::Error::NotEnoughSamples { .. }
            ))
        ));
    }

    #[test]
    fn fit_ratings_uses_every_rating() {
        let ratings = vec![
            Rating::new(1, 1, 5.0),
            Rating::new(1, 2, 3.0),
            Rating::new(2, 1, 4.0),
        ];
        match Recommender::from_key("baseline")
            .unwrap()
            .fit_ratings(&ratings)
            .unwrap()
        {
            FittedRecommender::Baseline(model) => assert_eq!(model.mean(), 4.0),
            other => panic!("unexpected model {}", other.key()),
        }
    }

    #[test]
    fn seed_only_touches_samplers() {
        let gaussian = Recommender::from_key("gaussian").unwrap().seed(3);
        assert_eq!(gaussian, Recommender::Gaussian(GaussianParams::new().seed(3)));

        let neigh = Recommender::from_key("neigh").unwrap();
        assert_eq!(neigh.clone().seed(3), neigh);
    }
}
