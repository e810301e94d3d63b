//! K-fold cross-validation
//!
//! Every fold of a [`RatingDataset`] is evaluated the same way: a fresh model is fitted on the
//! training rows, asked for the held-out (user, item) pairs and scored with the root mean squared
//! error against the held-out ratings. The hyperparameter set acts as the model factory, so no
//! state can leak from one fold into the next.

use std::fmt;

use ndarray::Array1;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{Float, RatingDataset};
use crate::traits::{Fit, Predict};

/// Scores of a single fold
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FoldScore<F> {
    pub fold: usize,
    pub ntrain: usize,
    pub ntest: usize,
    pub rmse: F,
    pub mae: F,
}

/// Per-fold scores of a cross-validation run
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidation<F> {
    folds: Vec<FoldScore<F>>,
}

impl<F: Float> CrossValidation<F> {
    pub fn new(folds: Vec<FoldScore<F>>) -> Self {
        CrossValidation { folds }
    }

    pub fn folds(&self) -> &[FoldScore<F>] {
        &self.folds
    }

    pub fn nfolds(&self) -> usize {
        self.folds.len()
    }

    /// Root mean squared error of every fold, in fold order
    pub fn scores(&self) -> Array1<F> {
        self.folds.iter().map(|f| f.rmse).collect()
    }

    pub fn mean(&self) -> F {
        self.scores().mean().unwrap_or_else(F::nan)
    }

    /// Population standard deviation of the fold scores
    pub fn std(&self) -> F {
        if self.folds.is_empty() {
            return F::nan();
        }
        self.scores().std(F::zero())
    }

    /// Standard error of the mean score, `std / sqrt(k)`
    pub fn std_error(&self) -> F {
        self.std() / F::cast(self.nfolds()).sqrt()
    }

    /// One line per fold followed by the summary
    pub fn table(&self) -> String {
        let mut out = String::new();
        for score in &self.folds {
            out.push_str(&format!("{:2} {:.4}\n", score.fold + 1, score.rmse));
        }
        out.push_str("--------------\n");
        out.push_str(&self.to_string());
        out
    }
}

impl<F: Float> fmt::Display for CrossValidation<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4} ± {:.3}", self.mean(), self.std_error())
    }
}

/// Fit a fresh model on the training rows of `fold` and score it on the test rows
pub fn evaluate_fold<F, E, P>(
    dataset: &RatingDataset<F>,
    fold: usize,
    params: &P,
) -> Result<FoldScore<F>, E>
where
    F: Float,
    E: std::error::Error + From<crate::error::Error>,
    P: Fit<F, E>,
{
    let (train_rows, test_rows) = dataset.load_fold(fold)?;
    let train = dataset.view_rows(&train_rows);
    let test = dataset.view_rows(&test_rows);

    debug!(fold, ntrain = train.len(), ntest = test.len(), "fitting fold");

    let model = params.fit(&train)?;
    let predictions = model.predict_many(&test.pairs());

    let score = FoldScore {
        fold,
        ntrain: train.len(),
        ntest: test.len(),
        rmse: test.rmse(&predictions),
        mae: test.mae(&predictions),
    };

    info!(fold, rmse = %score.rmse, mae = %score.mae, "fold evaluated");

    Ok(score)
}

/// Evaluate every fold of `dataset` in order
pub fn cross_validate<F, E, P>(
    dataset: &RatingDataset<F>,
    params: &P,
) -> Result<CrossValidation<F>, E>
where
    F: Float,
    E: std::error::Error + From<crate::error::Error>,
    P: Fit<F, E>,
{
    let folds = (0..dataset.nfolds())
        .map(|fold| evaluate_fold(dataset, fold, params))
        .collect::<Result<Vec<_>, E>>()?;

    let result = CrossValidation::new(folds);
    info!(summary = %result, "cross-validation finished");

    Ok(result)
}

impl<F: Float> RatingDataset<F> {
    /// Cross-validate `params` over the folds of this dataset
    ///
    /// See [`cross_validate`].
    pub fn cross_validate<E, P>(&self, params: &P) -> Result<CrossValidation<F>, E>
    where
        E: std::error::Error + From<crate::error::Error>,
        P: Fit<F, E>,
    {
        cross_validate(self, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FoldSplitter, ItemId, Rating, RatingsView, UserId};
    use crate::error::Error;
    use approx::assert_abs_diff_eq;
    use thiserror::Error;

    struct MockFittable {
        mock_var: usize,
    }

    struct MockFittableResult {
        mean: f64,
    }

    #[derive(Error, Debug)]
    enum MockError {
        #[error(transparent)]
        BaseCrate(#[from] Error),
    }

    impl Fit<f64, MockError> for MockFittable {
        type Object = MockFittableResult;

        fn fit(&self, training_data: &RatingsView<f64>) -> Result<Self::Object, MockError> {
            if self.mock_var == 0 {
                Err(MockError::BaseCrate(Error::Parameters("0".to_string())))
            } else {
                Ok(MockFittableResult {
                    mean: training_data.mean().unwrap_or(0.0),
                })
            }
        }
    }

    impl Predict<f64> for MockFittableResult {
        fn predict(&self, _user: UserId, _item: ItemId) -> f64 {
            self.mean
        }
    }

    fn dataset(nfolds: usize) -> RatingDataset<f64> {
        let ratings = (0..12u32)
            .map(|i| Rating::new(i % 4, i % 3, i as f64))
            .collect();
        RatingDataset::new(ratings, FoldSplitter::new(nfolds)).unwrap()
    }

    #[test]
    fn scores_every_fold() {
        let dataset = dataset(3);
        let result = cross_validate(&dataset, &MockFittable { mock_var: 1 }).unwrap();

        assert_eq!(result.nfolds(), 3);
        for (i, score) in result.folds().iter().enumerate() {
            assert_eq!(score.fold, i);
            assert_eq!(score.ntrain, 8);
            assert_eq!(score.ntest, 4);
            assert!(score.rmse >= score.mae);
        }
    }

    #[test]
    fn fold_score_matches_manual_computation() {
        let dataset = dataset(2);
        let score = evaluate_fold(&dataset, 1, &MockFittable { mock_var: 1 }).unwrap();

        let (train, test) = dataset.load_fold(1).unwrap();
        let mean = dataset.view_rows(&train).mean().unwrap();
        let expected = test
            .iter()
            .map(|&row| (dataset.ratings()[row].value - mean).powi(2))
            .sum::<f64>()
            / test.len() as f64;

        assert_abs_diff_eq!(score.rmse, expected.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dataset = dataset(4);
        let params = MockFittable { mock_var: 1 };
        let a = dataset.cross_validate(&params).unwrap();
        let b = dataset.cross_validate(&params).unwrap();

        assert_eq!(a.scores(), b.scores());
    }

    #[test]
    fn summary_uses_standard_error() {
        let result = CrossValidation::new(
            [1.0, 3.0, 1.0, 3.0]
                .iter()
                .enumerate()
                .map(|(fold, &rmse)| FoldScore {
                    fold,
                    ntrain: 3,
                    ntest: 1,
                    rmse,
                    mae: rmse,
                })
                .collect(),
        );

        assert_abs_diff_eq!(result.mean(), 2.0);
        assert_abs_diff_eq!(result.std(), 1.0);
        assert_abs_diff_eq!(result.std_error(), 0.5);
        assert_eq!(result.to_string(), "2.0000 ± 0.500");
        assert!(result.table().starts_with(" 1 1.0000\n 2 3.0000\n"));
    }

    #[test]
    fn fit_errors_are_forwarded() {
        let dataset = dataset(2);
        let err = cross_validate(&dataset, &MockFittable { mock_var: 0 }).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter 0");
    }

    #[test]
    fn out_of_range_fold_fails() {
        let dataset = dataset(2);
        let err = evaluate_fold(&dataset, 5, &MockFittable { mock_var: 1 }).unwrap_err();
        assert!(matches!(
            err,
            MockError::BaseCrate(Error::FoldOutOfRange { index: 5, nfolds: 2 })
        ));
    }
}
