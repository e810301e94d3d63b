use std::collections::HashSet;

use ndarray::Array1;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::{debug, info};

use super::{
    iter::RatingsIter, Float, FoldSplitter, Folds, ItemId, Rating, RatingDataset, RatingIndex,
    RatingsView, UserId,
};
use crate::error::{Error, Result};

impl<F: Float> RatingDataset<F> {
    /// Create a dataset from raw ratings
    ///
    /// Builds the sorted identifier lists, their dense bijections and the fold assignment drawn
    /// by `splitter`. Fails if the splitter asks for fewer than two folds or for more folds than
    /// there are ratings.
    pub fn new(ratings: Vec<Rating<F>>, splitter: FoldSplitter) -> Result<Self> {
        let index = RatingIndex::from_ratings(&ratings);
        let folds = splitter.split(ratings.len())?;

        let dataset = RatingDataset {
            ratings,
            index,
            splitter,
            folds,
        };

        info!(
            ratings = dataset.nratings(),
            users = dataset.nusers(),
            items = dataset.nitems(),
            folds = dataset.nfolds(),
            "rating dataset ready"
        );

        Ok(dataset)
    }

    pub fn ratings(&self) -> &[Rating<F>] {
        &self.ratings
    }

    pub fn index(&self) -> &RatingIndex {
        &self.index
    }

    pub fn folds(&self) -> &Folds {
        &self.folds
    }

    pub fn splitter(&self) -> &FoldSplitter {
        &self.splitter
    }

    pub fn nratings(&self) -> usize {
        self.ratings.len()
    }

    pub fn nusers(&self) -> usize {
        self.index.nusers()
    }

    pub fn nitems(&self) -> usize {
        self.index.nitems()
    }

    pub fn nfolds(&self) -> usize {
        self.folds.nfolds()
    }

    /// Training and test row positions of fold `fold`
    pub fn load_fold(&self, fold: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        self.folds.load_fold(fold)
    }

    /// View on all ratings
    pub fn view(&self) -> RatingsView<'_, F> {
        RatingsView {
            ratings: &self.ratings,
            rows: None,
            index: &self.index,
        }
    }

    /// View on the ratings at positions `rows`, in that order
    ///
    /// # Panics
    ///
    /// Iterating the view panics if a position is out of bounds.
    pub fn view_rows<'a>(&'a self, rows: &'a [usize]) -> RatingsView<'a, F> {
        RatingsView {
            ratings: &self.ratings,
            rows: Some(rows),
            index: &self.index,
        }
    }

    /// Keep the ratings of `nusers` randomly chosen users
    ///
    /// The users are drawn without replacement with a generator seeded by `seed`, the ratings of
    /// the chosen users keep their original order and the result is folded again with the same
    /// splitter.
    pub fn subsample_users(&self, nusers: usize, seed: u64) -> Result<Self> {
        if nusers > self.nusers() {
            return Err(Error::Parameters(format!(
                "cannot keep {} users out of {}",
                nusers,
                self.nusers()
            )));
        }

        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let chosen = rand::seq::index::sample(&mut rng, self.nusers(), nusers)
            .into_iter()
            .map(|i| self.index.users()[i])
            .collect::<HashSet<UserId>>();

        let ratings = self
            .ratings
            .iter()
            .filter(|r| chosen.contains(&r.user))
            .copied()
            .collect::<Vec<_>>();

        debug!(
            users = nusers,
            ratings = ratings.len(),
            seed,
            "subsampled users"
        );

        RatingDataset::new(ratings, self.splitter.clone())
    }
}

impl<'a, F: Float> RatingsView<'a, F> {
    /// A view on all of `ratings`, addressed through `index`
    pub fn new(ratings: &'a [Rating<F>], index: &'a RatingIndex) -> Self {
        RatingsView {
            ratings,
            rows: None,
            index,
        }
    }

    pub fn index(&self) -> &'a RatingIndex {
        self.index
    }

    pub fn len(&self) -> usize {
        match self.rows {
            Some(rows) => rows.len(),
            None => self.ratings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> RatingsIter<'a, F> {
        RatingsIter::new(self.ratings, self.rows)
    }

    /// Rating values in view order
    pub fn values(&self) -> Array1<F> {
        self.iter().map(|r| r.value).collect()
    }

    /// (user, item) pairs in view order
    pub fn pairs(&self) -> Vec<(UserId, ItemId)> {
        self.iter().map(|r| (r.user, r.item)).collect()
    }

    /// Arithmetic mean of the rating values, `None` for an empty view
    pub fn mean(&self) -> Option<F> {
        if self.is_empty() {
            return None;
        }
        let sum = self.iter().fold(F::zero(), |acc, r| acc + r.value);
        Some(sum / F::cast(self.len()))
    }

    pub fn min(&self) -> Option<F> {
        self.iter().map(|r| r.value).reduce(F::min)
    }

    pub fn max(&self) -> Option<F> {
        self.iter().map(|r| r.value).reduce(F::max)
    }
}

impl<'a, F: Float> IntoIterator for &RatingsView<'a, F> {
    type Item = &'a Rating<F>;
    type IntoIter = RatingsIter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
