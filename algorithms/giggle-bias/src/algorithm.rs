use giggle::traits::{Fit, Predict};
use giggle::{DefaultMap, Float, ItemId, RatingsView, UserId};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{BiasError, Result};
use crate::hyperparams::{BiasSgdParams, BiasSgdValidParams};

/// Additive bias model
///
/// A rating is estimated as `μ + b_u + b_i`, the training mean plus an offset of the user and
/// an offset of the item. Identifiers without a learned offset contribute zero, so a pair where
/// both are unseen is estimated by the training mean alone.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct BiasSgd<F> {
    mean: F,
    user_bias: DefaultMap<UserId, F>,
    item_bias: DefaultMap<ItemId, F>,
    history: Vec<F>,
    updates: usize,
    stopped_early: bool,
}

impl<F: Float> BiasSgd<F> {
    pub fn params() -> BiasSgdParams<F> {
        BiasSgdParams::new()
    }

    /// Mean of the training ratings, frozen before the first update
    pub fn mean(&self) -> F {
        self.mean
    }

    pub fn user_bias(&self, user: UserId) -> F {
        self.user_bias.get(&user)
    }

    pub fn item_bias(&self, item: ItemId) -> F {
        self.item_bias.get(&item)
    }

    /// Training RMSE at every checkpoint, the last entry is measured after the final update
    pub fn history(&self) -> &[F] {
        &self.history
    }

    /// Training RMSE after the final update
    pub fn training_rmse(&self) -> F {
        self.history.last().copied().unwrap_or_else(F::nan)
    }

    /// Number of single row updates performed
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Whether training ended before the epoch budget was used up
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }
}

struct Biases<F> {
    mean: F,
    user: DefaultMap<UserId, F>,
    item: DefaultMap<ItemId, F>,
}

impl<F: Float> Biases<F> {
    fn estimate(&self, user: UserId, item: ItemId) -> F {
        self.mean + self.user.get(&user) + self.item.get(&item)
    }

    fn rmse(&self, dataset: &RatingsView<F>) -> F {
        let squared = dataset
            .iter()
            .map(|r| {
                let err = r.value - self.estimate(r.user, r.item);
                err * err
            })
            .sum::<F>();

        (squared / F::cast(dataset.len())).sqrt()
    }
}

impl<F: Float> Fit<F, BiasError> for BiasSgdValidParams<F> {
    type Object = BiasSgd<F>;

    /// Train the biases with stochastic gradient descent
    ///
    /// Rows are visited in view order in every epoch. For a row `(u, i, r)` the residual
    /// `e = r - (μ + b_u + b_i)` is computed once and both biases move along it:
    /// `b_u += lr (e - reg b_u)` and `b_i += lr (e - reg b_i)`.
    fn fit(&self, dataset: &RatingsView<F>) -> Result<Self::Object> {
        let mean = dataset.mean().ok_or(giggle::Error::NotEnoughSamples {
            needed: 1,
            got: 0,
        })?;

        let mut biases = Biases {
            mean,
            user: DefaultMap::with_capacity(dataset.index().nusers(), F::zero()),
            item: DefaultMap::with_capacity(dataset.index().nitems(), F::zero()),
        };
        let (lr, reg) = (self.learning_rate(), self.regularization());

        let mut history = Vec::new();
        let mut updates = 0;
        let mut stopped_early = false;

        'epochs: for epoch in 0..self.epochs() {
            for rating in dataset.iter() {
                let err = rating.value - biases.estimate(rating.user, rating.item);

                let b_u = biases.user.entry(rating.user);
                let step = lr * (err - reg * *b_u);
                *b_u += step;
                let b_i = biases.item.entry(rating.item);
                let step = lr * (err - reg * *b_i);
                *b_i += step;

                updates += 1;
                if updates % self.check_period() != 0 {
                    continue;
                }

                let rmse = biases.rmse(dataset);
                debug!(epoch, updates, rmse = %rmse, "checkpoint");

                let previous = history.last().copied();
                history.push(rmse);
                if let Some(previous) = previous {
                    if previous - rmse <= self.tolerance() * previous {
                        stopped_early = true;
                        break 'epochs;
                    }
                }
            }
        }

        if updates % self.check_period() != 0 {
            history.push(biases.rmse(dataset));
        }

        info!(
            updates,
            stopped_early,
            rmse = %history.last().copied().unwrap_or_else(F::nan),
            "bias model trained"
        );

        Ok(BiasSgd {
            mean: biases.mean,
            user_bias: biases.user,
            item_bias: biases.item,
            history,
            updates,
            stopped_early,
        })
    }
}

impl<F: Float> Predict<F> for BiasSgd<F> {
    fn predict(&self, user: UserId, item: ItemId) -> F {
        self.mean + self.user_bias(user) + self.item_bias(item)
    }
}
