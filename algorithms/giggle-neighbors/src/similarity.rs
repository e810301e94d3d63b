use giggle::{Float, RatingMatrix};
use ndarray::{Array2, ArrayView1};
use tracing::debug;

/// Pearson correlation between the columns of a rating matrix, on co-rating users only
///
/// For every pair of items only users who rated both are considered, and each item is centered
/// by its mean over those users. Pairs with fewer than `min_support` co-raters, or without any
/// spread among them, have similarity zero. The result is symmetric with a unit diagonal and
/// entries in `[-1, 1]`.
pub fn pearson_similarity<F: Float>(matrix: &RatingMatrix<F>, min_support: usize) -> Array2<F> {
    let nitems = matrix.dim().1;
    let values = matrix.values();
    let observed = matrix.observed();

    let mut similarity = Array2::eye(nitems);
    let mut supported = 0;

    for i in 0..nitems {
        for j in (i + 1)..nitems {
            let corr = co_rated_pearson(
                values.column(i),
                values.column(j),
                observed.column(i),
                observed.column(j),
                min_support,
            );
            if let Some(corr) = corr {
                similarity[(i, j)] = corr;
                similarity[(j, i)] = corr;
                supported += 1;
            }
        }
    }

    debug!(items = nitems, supported, min_support, "item similarity computed");

    similarity
}

fn co_rated_pearson<F: Float>(
    a: ArrayView1<F>,
    b: ArrayView1<F>,
    rated_a: ArrayView1<bool>,
    rated_b: ArrayView1<bool>,
    min_support: usize,
) -> Option<F> {
    let common = rated_a
        .iter()
        .zip(rated_b.iter())
        .enumerate()
        .filter(|(_, (&x, &y))| x && y)
        .map(|(u, _)| u)
        .collect::<Vec<_>>();

    if common.len() < min_support {
        return None;
    }

    let n = F::cast(common.len());
    let mean_a = common.iter().map(|&u| a[u]).sum::<F>() / n;
    let mean_b = common.iter().map(|&u| b[u]).sum::<F>() / n;

    let (mut cov, mut var_a, mut var_b) = (F::zero(), F::zero(), F::zero());
    for &u in &common {
        let (da, db) = (a[u] - mean_a, b[u] - mean_b);
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let norm = (var_a * var_b).sqrt();
    if norm <= F::zero() {
        return None;
    }

    Some((cov / norm).max(-F::one()).min(F::one()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use giggle::{FoldSplitter, Rating, RatingDataset};
    use giggle_datasets::generate::biased_ratings;

    fn matrix_of(ratings: Vec<Rating<f64>>) -> RatingMatrix<f64> {
        let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
        RatingMatrix::from_view(&dataset.view())
    }

    #[test]
    fn symmetric_bounded_unit_diagonal() {
        let dataset = biased_ratings(120, 25, 0.4, 3).unwrap();
        let matrix = RatingMatrix::from_view(&dataset.view());
        let sims = pearson_similarity(&matrix, 5);

        assert_eq!(sims.dim(), (dataset.nitems(), dataset.nitems()));
        assert_abs_diff_eq!(sims, sims.t(), epsilon = 1e-12);
        assert!(sims.iter().all(|&s| (-1.0..=1.0).contains(&s)));
        assert!(sims.diag().iter().all(|&d| d == 1.0));
    }

    #[test]
    fn perfect_and_inverse_correlation() {
        let ratings = (1..=6u32)
            .flat_map(|u| {
                let x = u as f64;
                vec![
                    Rating::new(u, 1, x),
                    Rating::new(u, 2, 2.0 * x + 1.0),
                    Rating::new(u, 3, -x),
                ]
            })
            .collect();
        let sims = pearson_similarity(&matrix_of(ratings), 5);

        assert_abs_diff_eq!(sims[(0, 1)], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sims[(0, 2)], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sims[(2, 1)], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_co_raters_stay_zero() {
        // items 1 and 2 share four raters, item 3 is rated alone by a fifth user
        let mut ratings = (1..=4u32)
            .flat_map(|u| vec![Rating::new(u, 1, u as f64), Rating::new(u, 2, u as f64)])
            .collect::<Vec<_>>();
        ratings.push(Rating::new(5, 1, 3.0));
        ratings.push(Rating::new(5, 3, 1.0));

        let sims = pearson_similarity(&matrix_of(ratings.clone()), 5);
        assert_eq!(sims[(0, 1)], 0.0);
        assert_eq!(sims[(0, 2)], 0.0);

        let sims = pearson_similarity(&matrix_of(ratings), 4);
        assert_abs_diff_eq!(sims[(0, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_item_has_zero_similarity() {
        let ratings = (1..=6u32)
            .flat_map(|u| vec![Rating::new(u, 1, u as f64), Rating::new(u, 2, 3.0)])
            .collect();
        let sims = pearson_similarity(&matrix_of(ratings), 2);

        assert_eq!(sims[(0, 1)], 0.0);
        assert_eq!(sims[(1, 1)], 1.0);
    }
}
