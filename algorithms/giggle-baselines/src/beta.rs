use ndarray::Array1;
use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use statrs::distribution::Beta;
use statrs::function::gamma::digamma;
use tracing::{debug, trace};

use giggle::traits::{Fit, Predict};
use giggle::{Float, ItemId, RatingsView, UserId};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{BaselineError, Result};
use crate::hyperparams::{BetaParams, BetaValidParams};

/// Four parameter Beta distribution fitted to all training ratings
///
/// The support is fixed to `[min - eps, max + eps]` of the training ratings, i.e. `loc = min -
/// eps` and `scale = max - min + 2 eps`. The shapes `a` and `b` are maximum likelihood estimates
/// on the ratings mapped into the unit interval. Like [`GaussianBaseline`](crate::GaussianBaseline)
/// predictions are independent of the query and reproducible through the stored seed.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct BetaBaseline<F> {
    /// `None` when all training ratings are equal, the model then always predicts the center of
    /// the support
    shape: Option<(F, F)>,
    loc: F,
    scale: F,
    seed: u64,
}

impl<F: Float> BetaBaseline<F> {
    pub fn params() -> BetaParams<F> {
        BetaParams::new()
    }

    /// Shape parameters `(a, b)`, `None` for a degenerate fit
    pub fn shape(&self) -> Option<(F, F)> {
        self.shape
    }

    pub fn loc(&self) -> F {
        self.loc
    }

    pub fn scale(&self) -> F {
        self.scale
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
        let center = self.loc + self.scale / F::cast(2.0);
        let beta = self.shape.and_then(|(a, b)| {
            Beta::new(a.to_f64().unwrap_or(f64::NAN), b.to_f64().unwrap_or(f64::NAN)).ok()
        });

        match beta {
            Some(beta) => {
                let mut rng = Xoshiro256Plus::seed_from_u64(self.seed);
                (0..n)
                    .map(|_| self.loc + self.scale * F::cast(beta.sample(&mut rng)))
                    .collect()
            }
            None => Array1::from_elem(n, center),
        }
    }
}

impl<F: Float> Fit<F, BaselineError> for BetaValidParams<F> {
    type Object = BetaBaseline<F>;

    fn fit(&self, dataset: &RatingsView<F>) -> Result<Self::Object> {
        let not_enough = giggle::Error::NotEnoughSamples { needed: 1, got: 0 };
        let min = dataset.min().ok_or_else(|| not_enough.clone())?;
        let max = dataset.max().ok_or(not_enough)?;

        let loc = min - self.eps();
        let scale = max - min + self.eps() * F::cast(2.0);

        let shape = if max > min {
            let unit = dataset
                .iter()
                .map(|r| ((r.value - loc) / scale).to_f64().unwrap_or(f64::NAN))
                .collect::<Vec<_>>();
            let (a, b) = fit_shape(
                &unit,
                self.max_iter(),
                self.tol().to_f64().unwrap_or(f64::EPSILON),
            )?;
            Some((F::cast(a), F::cast(b)))
        } else {
            None
        };

        debug!(?shape, loc = %loc, scale = %scale, "fitted beta baseline");

        Ok(BetaBaseline {
            shape,
            loc,
            scale,
            seed: self.seed(),
        })
    }
}

impl<F: Float> Predict<F> for BetaBaseline<F> {
    /// First value of the sequence [`predict_many`](Predict::predict_many) would return
    fn predict(&self, _user: UserId, _item: ItemId) -> F {
        self.sample(1)[0]
    }

    fn predict_many(&self, pairs: &[(UserId, ItemId)]) -> Array1<F> {
        self.sample(pairs.len())
    }
}

/// Maximum likelihood shapes of a standard Beta distribution for samples in `(0, 1)`
///
/// Solves `ψ(a) - ψ(a + b) = mean(ln x)` and `ψ(b) - ψ(a + b) = mean(ln(1 - x))` with
/// Newton-Raphson, starting from the method of moments estimate.
fn fit_shape(x: &[f64], max_iter: usize, tol: f64) -> Result<(f64, f64)> {
    let n = x.len() as f64;
    let mean_log = x.iter().map(|v| v.ln()).sum::<f64>() / n;
    let mean_log1m = x.iter().map(|v| (1.0 - v).ln()).sum::<f64>() / n;

    let (mut a, mut b) = moments_start(x);

    for iteration in 0..max_iter {
        let psi_ab = digamma(a + b);
        let f1 = digamma(a) - psi_ab - mean_log;
        let f2 = digamma(b) - psi_ab - mean_log1m;

        let tri_ab = trigamma(a + b);
        let j11 = trigamma(a) - tri_ab;
        let j22 = trigamma(b) - tri_ab;
        let j12 = -tri_ab;
        let det = j11 * j22 - j12 * j12;
        if !det.is_finite() || det == 0.0 {
            break;
        }

        let da = (j22 * f1 - j12 * f2) / det;
        let db = (j11 * f2 - j12 * f1) / det;

        // halve the step until both shapes stay positive
        let mut step = 1.0;
        while a - step * da <= 0.0 || b - step * db <= 0.0 {
            step /= 2.0;
        }
        a -= step * da;
        b -= step * db;

        trace!(iteration, a, b, "beta newton step");

        if (step * da / a).abs() < tol && (step * db / b).abs() < tol {
            return Ok((a, b));
        }
    }

    Err(BaselineError::NotConverged(max_iter))
}

fn moments_start(x: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    if var > 0.0 && var < mean * (1.0 - mean) {
        let common = mean * (1.0 - mean) / var - 1.0;
        (mean * common, (1.0 - mean) * common)
    } else {
        (1.0, 1.0)
    }
}

/// Derivative of the digamma function for positive arguments
fn trigamma(mut x: f64) -> f64 {
    let mut acc = 0.0;
    while x < 10.0 {
        acc += 1.0 / (x * x);
        x += 1.0;
    }

    let inv = 1.0 / x;
    let inv2 = inv * inv;
    acc + inv
        + inv2 / 2.0
        + inv * inv2 * (1.0 / 6.0 - inv2 * (1.0 / 30.0 - inv2 * (1.0 / 42.0 - inv2 / 30.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use giggle::{FoldSplitter, Rating, RatingDataset};

    fn dataset(values: &[f64]) -> RatingDataset<f64> {
        let ratings = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Rating::new(i as u32, i as u32 % 3, v))
            .collect();
        RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap()
    }

    #[test]
    fn trigamma_matches_known_values() {
        let pi2 = std::f64::consts::PI.powi(2);
        assert_abs_diff_eq!(trigamma(1.0), pi2 / 6.0, epsilon = 1e-10);
        assert_abs_diff_eq!(trigamma(0.5), pi2 / 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(trigamma(2.0), pi2 / 6.0 - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn recovers_shapes_of_a_sample() {
        let truth = Beta::new(2.0, 5.0).unwrap();
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let x = (0..20_000)
            .map(|_| truth.sample(&mut rng))
            .collect::<Vec<f64>>();

        let (a, b) = fit_shape(&x, 100, 1e-10).unwrap();
        assert_abs_diff_eq!(a, 2.0, epsilon = 0.15);
        assert_abs_diff_eq!(b, 5.0, epsilon = 0.4);
    }

    #[test]
    fn support_is_widened_range() {
        let dataset = dataset(&[-10.0, -2.5, 0.0, 1.0, 3.5, 10.0]);
        let model = BetaBaseline::params().fit(&dataset.view()).unwrap();

        assert_abs_diff_eq!(model.loc(), -10.1, epsilon = 1e-12);
        assert_abs_diff_eq!(model.scale(), 20.2, epsilon = 1e-12);
        let (a, b) = model.shape().unwrap();
        assert!(a > 0.0 && b > 0.0);

        let samples = model.sample(500);
        assert!(samples.iter().all(|&v| v > -10.1 && v < 10.1));
    }

    #[test]
    fn sampling_is_reproducible() {
        let dataset = dataset(&[1.0, 2.0, 2.0, 3.0, 5.0]);
        let model = BetaBaseline::params().seed(11).fit(&dataset.view()).unwrap();
        let pairs = vec![(1, 1); 6];

        let first = model.predict_many(&pairs);
        assert_eq!(first, model.predict_many(&pairs));
        assert_eq!(model.predict(0, 0), first[0]);
    }

    #[test]
    fn identical_ratings_predict_the_value() {
        let dataset = dataset(&[4.0, 4.0, 4.0]);
        let model = BetaBaseline::params().fit(&dataset.view()).unwrap();

        assert_eq!(model.shape(), None);
        assert_abs_diff_eq!(model.predict(1, 1), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let dataset = dataset(&[1.0, 2.0, 2.0, 3.0, 5.0, 8.0]);
        let err = BetaBaseline::params()
            .max_iterations(1)
            .tolerance(1e-300)
            .fit(&dataset.view())
            .map(|_: BetaBaseline<f64>| ())
            .unwrap_err();

        assert!(matches!(err, BaselineError::NotConverged(1)));
    }
}
