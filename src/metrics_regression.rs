//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables, such as predicted
//! and observed ratings.

use ndarray::prelude::*;
use ndarray::IntoNdProducer;
use ndarray::{Data, NdFloat};
use num_traits::FromPrimitive;
use std::ops::Sub;

use crate::dataset::{Float, RatingsView};

/// Regression metrices trait
///
/// Empty inputs yield `NaN` for the averaged metrics.
pub trait Regression<
    'a,
    A: 'a,
    T: IntoNdProducer<Item = &'a A, Dim = Ix1, Output = ArrayView<'a, A, Ix1>>,
>
{
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: T) -> A;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: T) -> A;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: T) -> A;
    /// Square root of the mean squared error, on the scale of the variables
    ///
    /// To evaluate the accuracy of a prediction, use
    /// ```ignore
    /// prediction.root_mean_squared_error(ground_truth)
    /// ```
    fn root_mean_squared_error(&self, compare_to: T) -> A;
}

impl<
        'a,
        A: 'a + NdFloat + FromPrimitive,
        D: Data<Elem = A>,
        T: IntoNdProducer<Item = &'a A, Dim = Ix1, Output = ArrayView<'a, A, Ix1>>,
    > Regression<'a, A, T> for ArrayBase<D, Ix1>
{
    fn max_error(&self, compare_to: T) -> A {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();

        self.sub(&compare_to)
            .iter()
            .map(|x| x.abs())
            .fold(A::neg_infinity(), A::max)
    }

    fn mean_absolute_error(&self, compare_to: T) -> A {
        let compare_to = compare_to.into_producer();

        self.sub(&compare_to)
            .mapv(|x| x.abs())
            .mean()
            .unwrap_or_else(A::nan)
    }

    fn mean_squared_error(&self, compare_to: T) -> A {
        let compare_to = compare_to.into_producer();

        self.sub(&compare_to)
            .mapv(|x| x * x)
            .mean()
            .unwrap_or_else(A::nan)
    }

    fn root_mean_squared_error(&self, compare_to: T) -> A {
        self.mean_squared_error(compare_to).sqrt()
    }
}

impl<'v, F: Float> RatingsView<'v, F> {
    fn assert_matches<D: Data<Elem = F>>(&self, predictions: &ArrayBase<D, Ix1>) {
        assert_eq!(
            predictions.len(),
            self.len(),
            "The number of predictions must match the number of ratings."
        );
    }

    /// Root mean squared error of `predictions` against the ratings of this view
    ///
    /// # Panics
    ///
    /// If the number of predictions differs from the number of ratings.
    pub fn rmse<D: Data<Elem = F>>(&self, predictions: &ArrayBase<D, Ix1>) -> F {
        self.assert_matches(predictions);
        predictions.root_mean_squared_error(&self.values())
    }

    /// Mean absolute error of `predictions` against the ratings of this view
    ///
    /// # Panics
    ///
    /// If the number of predictions differs from the number of ratings.
    pub fn mae<D: Data<Elem = F>>(&self, predictions: &ArrayBase<D, Ix1>) -> F {
        self.assert_matches(predictions);
        predictions.mean_absolute_error(&self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::Regression;
    use crate::dataset::{FoldSplitter, Rating, RatingDataset};
    use approx::assert_abs_diff_eq;
    use ndarray::prelude::*;

    #[test]
    fn test_same() {
        let a: Array1<f32> = Array1::ones(100);

        assert_abs_diff_eq!(a.max_error(&a), 0.0f32);
        assert_abs_diff_eq!(a.mean_absolute_error(&a), 0.0f32);
        assert_abs_diff_eq!(a.mean_squared_error(&a), 0.0f32);
        assert_abs_diff_eq!(a.root_mean_squared_error(&a), 0.0f32);
    }

    #[test]
    fn test_max_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.3, 0.2, 0.5, 0.7];

        assert_abs_diff_eq!(a.max_error(&b), 0.3f32, epsilon = 1e-5);
    }

    #[test]
    fn test_mean_absolute_error() {
        let a = array![0.1, 0.3, 0.2, 0.5, 0.7];
        let b = array![0.0, 0.1, 0.2, 0.3, 0.4];

        assert_abs_diff_eq!(a.mean_absolute_error(&b), 0.16, epsilon = 1e-5);
    }

    #[test]
    fn test_mean_squared_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4, 0.5];

        assert_abs_diff_eq!(a.mean_squared_error(&b), 0.01, epsilon = 1e-5);
        assert_abs_diff_eq!(a.root_mean_squared_error(&b), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_is_nan() {
        let a: Array1<f64> = Array1::zeros(0);
        assert!(a.mean_squared_error(&a).is_nan());
    }

    #[test]
    fn test_rmse_of_view() {
        let ratings = vec![
            Rating::new(1, 1, 1.0),
            Rating::new(1, 2, 2.0),
            Rating::new(2, 1, 3.0),
            Rating::new(2, 2, 4.0),
        ];
        let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
        let rows = [1, 3];
        let view = dataset.view_rows(&rows);

        assert_abs_diff_eq!(view.rmse(&array![2.0, 4.0]), 0.0);
        assert_abs_diff_eq!(view.rmse(&array![3.0, 2.0]), (2.5f64).sqrt());
        assert_abs_diff_eq!(view.mae(&array![3.0, 2.0]), 1.5);
    }

    #[test]
    fn view_scores_agree_with_the_trait() {
        let ratings = (0..6u32)
            .map(|i| Rating::new(i, i % 2, i as f32 * 0.5))
            .collect();
        let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
        let view = dataset.view();
        let predictions = Array1::from_elem(view.len(), 1.0f32);

        assert_abs_diff_eq!(
            view.rmse(&predictions),
            predictions.root_mean_squared_error(&view.values())
        );
        assert_abs_diff_eq!(
            view.mae(&predictions),
            predictions.mean_absolute_error(&view.values())
        );
    }

    #[test]
    #[should_panic]
    fn view_score_length_mismatch_panics() {
        let ratings = vec![Rating::new(1, 1, 1.0f64), Rating::new(2, 1, 2.0)];
        let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
        // a single prediction would broadcast silently without the check
        dataset.view().rmse(&array![1.0]);
    }
}
