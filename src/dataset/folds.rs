use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seed used for fold assignment and subsampling unless told otherwise
pub const DEFAULT_SEED: u64 = 1337;

/// Draws a k-way partition of row positions
///
/// The rows are shuffled with a seeded generator and the permutation is cut into `nfolds`
/// contiguous chunks. The first `nsamples % nfolds` chunks hold one row more than the others.
/// Identical row count and seed always produce identical folds.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSplitter {
    nfolds: usize,
    seed: u64,
}

impl FoldSplitter {
    pub fn new(nfolds: usize) -> Self {
        FoldSplitter {
            nfolds,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the seed of the row shuffle.
    ///
    /// Defaults to `1337` if not set
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn nfolds(&self) -> usize {
        self.nfolds
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// Assign each of `nsamples` rows to exactly one test fold
    pub fn split(&self, nsamples: usize) -> Result<Folds> {
        if self.nfolds < 2 {
            return Err(Error::InvalidFoldCount(self.nfolds));
        }
        if nsamples < self.nfolds {
            return Err(Error::NotEnoughSamples {
                needed: self.nfolds,
                got: nsamples,
            });
        }

        let mut rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let mut permutation = (0..nsamples).collect::<Vec<_>>();
        permutation.shuffle(&mut rng);

        let base = nsamples / self.nfolds;
        let remainder = nsamples % self.nfolds;

        let mut assignment = vec![0; nsamples];
        let mut test = Vec::with_capacity(self.nfolds);
        let mut start = 0;
        for fold in 0..self.nfolds {
            let size = if fold < remainder { base + 1 } else { base };
            let mut rows = permutation[start..start + size].to_vec();
            rows.sort_unstable();
            for &row in &rows {
                assignment[row] = fold;
            }
            test.push(rows);
            start += size;
        }

        debug!(nsamples, nfolds = self.nfolds, seed = self.seed, "folds drawn");

        Ok(Folds { assignment, test })
    }
}

/// A fixed assignment of rows to test folds
///
/// Fold `i` tests on the rows assigned to it and trains on every other row. Both lists are in
/// ascending row order.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folds {
    assignment: Vec<usize>,
    test: Vec<Vec<usize>>,
}

impl Folds {
    pub fn nfolds(&self) -> usize {
        self.test.len()
    }

    pub fn nsamples(&self) -> usize {
        self.assignment.len()
    }

    /// Test fold of `row`
    pub fn fold_of(&self, row: usize) -> Option<usize> {
        self.assignment.get(row).copied()
    }

    /// Rows held out by fold `fold`
    pub fn test_rows(&self, fold: usize) -> Result<&[usize]> {
        self.test
            .get(fold)
            .map(Vec::as_slice)
            .ok_or(Error::FoldOutOfRange {
                index: fold,
                nfolds: self.nfolds(),
            })
    }

    /// Rows fold `fold` trains on
    pub fn train_rows(&self, fold: usize) -> Result<Vec<usize>> {
        self.check_fold(fold)?;
        Ok(self
            .assignment
            .iter()
            .enumerate()
            .filter(|(_, &f)| f != fold)
            .map(|(row, _)| row)
            .collect())
    }

    /// Training and test rows of fold `fold`
    pub fn load_fold(&self, fold: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        let train = self.train_rows(fold)?;
        let test = self.test_rows(fold)?.to_vec();
        Ok((train, test))
    }

    fn check_fold(&self, fold: usize) -> Result<()> {
        if fold < self.nfolds() {
            Ok(())
        } else {
            Err(Error::FoldOutOfRange {
                index: fold,
                nfolds: self.nfolds(),
            })
        }
    }
}
