use ndarray::Array1;
use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use statrs::distribution::Normal;
use tracing::debug;

use giggle::traits::{Fit, Predict};
use giggle::{Float, ItemId, RatingsView, UserId};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{BaselineError, Result};
use crate::hyperparams::GaussianValidParams;

/// Normal distribution fitted to all training ratings
///
/// Predictions ignore who rates what: every query is answered with a draw from
/// `N(mean, std²)`. A generator is seeded afresh on every call, so a fitted model answers the
/// same number of queries with the same values. A training set without spread (a single rating
/// or identical ratings) collapses to a point mass at the mean.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBaseline<F> {
    mean: F,
    std: F,
    seed: u64,
}

impl<F: Float> GaussianBaseline<F> {
    pub fn mean(&self) -> F {
        self.mean
    }

    /// Sample standard deviation of the training ratings
    pub fn std(&self) -> F {
        self.std
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replace the sampling seed of a fitted model
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw `n` ratings from a generator started at the model's seed
    pub fn sample(&self, n: usize) -> Array1<F> {
        let mean = self.mean.to_f64().unwrap_or(f64::NAN);
        let std = self.std.to_f64().unwrap_or(f64::NAN);

        match Normal::new(mean, std) {
            Ok(normal) if std > 0.0 => {
                let mut rng = Xoshiro256Plus::seed_from_u64(self.seed);
                (0..n).map(|_| F::cast(normal.sample(&mut rng))).collect()
            }
            _ => Array1::from_elem(n, self.mean),
        }
    }
}

impl<F: Float> Fit<F, BaselineError> for GaussianValidParams {
    type Object = GaussianBaseline<F>;

    fn fit(&self, dataset: &RatingsView<F>) -> Result<Self::Object> {
        let values = dataset.values();
        let mean = dataset.mean().ok_or(giggle::Error::NotEnoughSamples {
            needed: 1,
            got: 0,
        })?;
        let std = if values.len() < 2 {
            F::zero()
        } else {
            values.std(F::one())
        };

        debug!(mean = %mean, std = %std, n = values.len(), "fitted gaussian baseline");

        Ok(GaussianBaseline {
            mean,
            std,
            seed: self.seed(),
        })
    }
}

impl<F: Float> Predict<F> for GaussianBaseline<F> {
    /// First value of the sequence [`predict_many`](Predict::predict_many) would return
    fn predict(&self, _user: UserId, _item: ItemId) -> F {
        self.sample(1)[0]
    }

    fn predict_many(&self, pairs: &[(UserId, ItemId)]) -> Array1<F> {
        self.sample(pairs.len())
    }
}
