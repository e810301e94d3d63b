use giggle::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::BiasError;

/// A verified hyper-parameter set ready for training a bias model
///
/// See [`BiasSgdParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BiasSgdValidParams<F> {
    pub(crate) epochs: usize,
    pub(crate) learning_rate: F,
    pub(crate) regularization: F,
    pub(crate) check_period: usize,
    pub(crate) tolerance: F,
}

impl<F: Float> BiasSgdValidParams<F> {
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn regularization(&self) -> F {
        self.regularization
    }

    pub fn check_period(&self) -> usize {
        self.check_period
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }
}

/// Hyper-parameters of the bias model
///
/// Training sweeps the rows `epochs` times with learning rate `learning_rate` and L2 penalty
/// `regularization` on both biases. Every `check_period` updates the training error is measured
/// and training ends once it improves by less than `tolerance`, relative to the previous
/// measurement.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BiasSgdParams<F>(pub(crate) BiasSgdValidParams<F>);

impl<F: Float> Default for BiasSgdParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> BiasSgdParams<F> {
    pub fn new() -> Self {
        Self(BiasSgdValidParams {
            epochs: 5,
            learning_rate: F::cast(0.01),
            regularization: F::cast(0.1),
            check_period: 10_000,
            tolerance: F::cast(1e-4),
        })
    }

    /// Set the number of sweeps over the training rows.
    ///
    /// Defaults to `5` if not set
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.0.epochs = epochs;
        self
    }

    /// Set the learning rate.
    ///
    /// Defaults to `0.01` if not set
    ///
    /// `learning_rate` must be positive and finite
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the L2 penalty of the biases.
    ///
    /// Defaults to `0.1` if not set
    pub fn regularization(mut self, regularization: F) -> Self {
        self.0.regularization = regularization;
        self
    }

    /// Set the number of updates between two training error checkpoints.
    ///
    /// Defaults to `10000` if not set
    pub fn check_period(mut self, check_period: usize) -> Self {
        self.0.check_period = check_period;
        self
    }

    /// Set the relative improvement below which training stops.
    ///
    /// Defaults to `1e-4` if not set. A tolerance of zero only stops once the error rises.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }
}

impl<F: Float> ParamGuard for BiasSgdParams<F> {
    type Checked = BiasSgdValidParams<F>;
    type Error = BiasError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let to_f32 = |x: F| x.to_f32().unwrap_or(f32::NAN);

        if self.0.epochs == 0 {
            Err(BiasError::InvalidEpochs)
        } else if self.0.check_period == 0 {
            Err(BiasError::InvalidCheckPeriod)
        } else if !self.0.learning_rate.is_finite() || self.0.learning_rate <= F::zero() {
            Err(BiasError::InvalidLearningRate(to_f32(self.0.learning_rate)))
        } else if !self.0.regularization.is_finite() || self.0.regularization.is_negative() {
            Err(BiasError::InvalidRegularization(to_f32(
                self.0.regularization,
            )))
        } else if !self.0.tolerance.is_finite() || self.0.tolerance.is_negative() {
            Err(BiasError::InvalidTolerance(to_f32(self.0.tolerance)))
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
    fn defaults_follow_reference_setup() {
        let params = BiasSgdParams::<f64>::default().check().unwrap();
        assert_eq!(params.epochs(), 5);
        assert_eq!(params.learning_rate(), 0.01);
        assert_eq!(params.regularization(), 0.1);
        assert_eq!(params.check_period(), 10_000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            BiasSgdParams::<f64>::new().epochs(0).check(),
            Err(BiasError::InvalidEpochs)
        ));
        assert!(matches!(
            BiasSgdParams::<f64>::new().check_period(0).check(),
            Err(BiasError::InvalidCheckPeriod)
        ));
        assert!(matches!(
            BiasSgdParams::<f64>::new().learning_rate(0.0).check(),
            Err(BiasError::InvalidLearningRate(_))
        ));
        assert!(matches!(
            BiasSgdParams::<f64>::new().regularization(-0.1).check(),
            Err(BiasError::InvalidRegularization(_))
        ));
        assert!(matches!(
            BiasSgdParams::<f64>::new().tolerance(f64::INFINITY).check(),
            Err(BiasError::InvalidTolerance(_))
        ));
    }
}
