use giggle::dataset::DEFAULT_SEED;
use giggle::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::BaselineError;

/// A verified hyper-parameter set of the Gaussian sampler
///
/// See [`GaussianParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianValidParams {
    pub(crate) seed: u64,
}

impl GaussianValidParams {
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Hyper-parameters of the Gaussian sampler
///
/// The only knob is the seed of the generator that draws the predictions. It is stored in the
/// fitted model and every prediction call starts a fresh generator from it.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianParams(pub(crate) GaussianValidParams);

impl Default for GaussianParams {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianParams {
    pub fn new() -> Self {
        Self(GaussianValidParams { seed: DEFAULT_SEED })
    }

    /// Set the sampling seed.
    ///
    /// Defaults to `1337` if not set
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }
}

impl ParamGuard for GaussianParams {
    type Checked = GaussianValidParams;
    type Error = BaselineError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set of the Beta sampler
///
/// See [`BetaParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BetaValidParams<F> {
    pub(crate) seed: u64,
    pub(crate) eps: F,
    pub(crate) max_iter: usize,
    pub(crate) tol: F,
}

impl<F: Float> BetaValidParams<F> {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn eps(&self) -> F {
        self.eps
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn tol(&self) -> F {
        self.tol
    }
}

/// Hyper-parameters of the Beta sampler
///
/// The support of the fitted distribution is the range of the training ratings widened by `eps`
/// on both sides. Only the two shape parameters are estimated, by maximum likelihood.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BetaParams<F>(pub(crate) BetaValidParams<F>);

impl<F: Float> Default for BetaParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> BetaParams<F> {
    pub fn new() -> Self {
        Self(BetaValidParams {
            seed: DEFAULT_SEED,
            eps: F::cast(0.1),
            max_iter: 200,
            tol: F::cast(1e-10),
        })
    }

    /// Set the sampling seed.
    ///
    /// Defaults to `1337` if not set
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    /// Set the margin added around the observed rating range.
    ///
    /// Defaults to `0.1` if not set
    ///
    /// `eps` must be positive and finite, otherwise the smallest and largest ratings lie on the
    /// border of the support where the likelihood vanishes
    pub fn eps(mut self, eps: F) -> Self {
        self.0.eps = eps;
        self
    }

    /// Set the iteration budget of the shape estimate.
    ///
    /// Defaults to `200` if not set
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.0.max_iter = max_iter;
        self
    }

    /// Set the relative step size below which the shape estimate is considered converged.
    ///
    /// Defaults to `1e-10` if not set
    pub fn tolerance(mut self, tol: F) -> Self {
        self.0.tol = tol;
        self
    }
}

impl<F: Float> ParamGuard for BetaParams<F> {
    type Checked = BetaValidParams<F>;
    type Error = BaselineError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if !self.0.eps.is_finite() || self.0.eps <= F::zero() {
            Err(BaselineError::InvalidEpsilon(
                self.0.eps.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !self.0.tol.is_finite() || self.0.tol <= F::zero() {
            Err(BaselineError::InvalidTolerance(
                self.0.tol.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_iter == 0 {
            Err(BaselineError::InvalidMaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GaussianParams::default().check().is_ok());
        let params = BetaParams::<f64>::default().check().unwrap();
        assert_eq!(params.seed(), 1337);
        assert_eq!(params.eps(), 0.1);
    }

    #[test]
    fn invalid_beta_params() {
        assert!(matches!(
            BetaParams::<f64>::new().eps(0.0).check(),
            Err(BaselineError::InvalidEpsilon(_))
        ));
        assert!(matches!(
            BetaParams::<f64>::new().tolerance(f64::NAN).check(),
            Err(BaselineError::InvalidTolerance(_))
        ));
        assert!(matches!(
            BetaParams::<f64>::new().max_iterations(0).check(),
            Err(BaselineError::InvalidMaxIterations)
        ));
    }
}
