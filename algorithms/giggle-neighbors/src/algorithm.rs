use std::cmp::Ordering;

use giggle::traits::{Fit, Predict};
use giggle::{Float, ItemId, RatingIndex, RatingMatrix, RatingsView, UserId};
use ndarray::{Array2, ArrayView2};
use tracing::info;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{NeighborsError, Result};
use crate::hyperparams::ItemNeighborhoodValidParams;
use crate::similarity::pearson_similarity;

/// Item-to-item neighbourhood model
///
/// A rating of item `i` by user `u` is estimated as the similarity weighted average of the
/// ratings `u` gave to the `k` items most similar to `i`. Only items the user actually rated and
/// whose similarity to `i` is positive take part. Unknown users or items, and queries without a
/// single qualifying neighbour, are answered with the training mean.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemNeighborhood<F> {
    k: usize,
    mean: F,
    index: RatingIndex,
    matrix: RatingMatrix<F>,
    similarity: Array2<F>,
    /// Positively similar items of every item, most similar first
    neighbors: Vec<Vec<usize>>,
}

impl<F: Float> ItemNeighborhood<F> {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn mean(&self) -> F {
        self.mean
    }

    /// Index of the dataset the model was trained on
    pub fn index(&self) -> &RatingIndex {
        &self.index
    }

    /// Dense user × item matrix of the training ratings
    pub fn rating_matrix(&self) -> &RatingMatrix<F> {
        &self.matrix
    }

    /// Item × item similarity, addressed by item position
    pub fn similarity(&self) -> ArrayView2<F> {
        self.similarity.view()
    }

    /// Positions of the items similar to the item at `item`, most similar first
    pub fn neighbors_of(&self, item: usize) -> &[usize] {
        &self.neighbors[item]
    }

    /// Up to `n` items most similar to `item`, with their similarity
    ///
    /// Only positively similar items are listed, most similar first. An item the model never saw
    /// has no similar items.
    pub fn similar_items(&self, item: ItemId, n: usize) -> Vec<(ItemId, F)> {
        let i = match self.index.item_index(item) {
            Some(i) => i,
            None => return Vec::new(),
        };

        self.neighbors_of(i)
            .iter()
            .take(n)
            .map(|&other| (self.index.items()[other], self.similarity[(i, other)]))
            .collect()
    }

    /// Up to `n` items `user` has not rated yet, ranked by their estimated rating
    ///
    /// Ties are broken by item id. An unknown user gets the training mean for every item.
    pub fn recommend(&self, user: UserId, n: usize) -> Vec<(ItemId, F)> {
        let position = self.index.user_index(user);

        let mut candidates = self
            .index
            .items()
            .iter()
            .enumerate()
            .filter(|&(i, _)| position.map_or(true, |u| !self.matrix.is_observed(u, i)))
            .map(|(i, &item)| {
                let estimate = position
                    .and_then(|u| self.estimate(u, i))
                    .unwrap_or(self.mean);
                (item, estimate)
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        candidates.truncate(n);
        candidates
    }

    fn estimate(&self, user: usize, item: usize) -> Option<F> {
        let (mut weighted, mut total) = (F::zero(), F::zero());

        for &other in self
            .neighbors_of(item)
            .iter()
            .filter(|&&other| self.matrix.is_observed(user, other))
            .take(self.k)
        {
            let sim = self.similarity[(item, other)];
            weighted += sim * self.matrix.get(user, other);
            total += sim;
        }

        if total > F::zero() {
            Some(weighted / total)
        } else {
            None
        }
    }
}

fn rank_neighbors<F: Float>(similarity: &Array2<F>) -> Vec<Vec<usize>> {
    similarity
        .rows()
        .into_iter()
        .enumerate()
        .map(|(item, row)| {
            let mut others = row
                .iter()
                .enumerate()
                .filter(|&(other, &sim)| other != item && sim > F::zero())
                .map(|(other, _)| other)
                .collect::<Vec<_>>();
            others.sort_by(|&a, &b| {
                row[b]
                    .partial_cmp(&row[a])
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });
            others
        })
        .collect()
}

impl<F: Float> Fit<F, NeighborsError> for ItemNeighborhoodValidParams {
    type Object = ItemNeighborhood<F>;

    fn fit(&self, dataset: &RatingsView<F>) -> Result<Self::Object> {
        let mean = dataset.mean().ok_or(giggle::Error::NotEnoughSamples {
            needed: 1,
            got: 0,
        })?;

        let matrix = RatingMatrix::from_view(dataset);
        let similarity = pearson_similarity(&matrix, self.min_support());
        let neighbors = rank_neighbors(&similarity);

        info!(
            users = matrix.dim().0,
            items = matrix.dim().1,
            k = self.k(),
            "item neighbourhood fitted"
        );

        Ok(ItemNeighborhood {
            k: self.k(),
            mean,
            index: dataset.index().clone(),
            matrix,
            similarity,
            neighbors,
        })
    }
}

impl<F: Float> Predict<F> for ItemNeighborhood<F> {
    fn predict(&self, user: UserId, item: ItemId) -> F {
        match (self.index.user_index(user), self.index.item_index(item)) {
            (Some(u), Some(i)) => self.estimate(u, i).unwrap_or(self.mean),
            _ => self.mean,
        }
    }
}
