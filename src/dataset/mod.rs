//! Datasets
//!
//! This module implements the rating dataset, its dense index bijections, borrowed views on a
//! subset of its rows and the helper types built on top of them.
use ndarray::{NdFloat, ScalarOperand};
use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::collections::HashMap;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod folds;
mod impl_dataset;
mod iter;
mod matrix;

pub use folds::{FoldSplitter, Folds, DEFAULT_SEED};
pub use iter::RatingsIter;
pub use matrix::RatingMatrix;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Rating values, biases, similarities and
/// errors are all expressed in it.
pub trait Float:
    NdFloat
    + FromPrimitive
    + Default
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Alias for user identifiers as they appear in the rating source
pub type UserId = u32;
/// Alias for item identifiers as they appear in the rating source
pub type ItemId = u32;

/// A single observed rating of `item` by `user`
///
/// The value is kept on whatever scale the rating source uses, it is not validated here.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating<F> {
    pub user: UserId,
    pub item: ItemId,
    pub value: F,
}

impl<F> Rating<F> {
    pub fn new(user: UserId, item: ItemId, value: F) -> Self {
        Rating { user, item, value }
    }
}

/// Dense index bijections of a rating table
///
/// Users and items are sorted by identifier and numbered from zero. Rows and columns of
/// [`RatingMatrix`] as well as every index based algorithm are addressed through this mapping, so
/// it never changes once built.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RatingIndex {
    users: Vec<UserId>,
    items: Vec<ItemId>,
    user_to_index: HashMap<UserId, usize>,
    item_to_index: HashMap<ItemId, usize>,
}

impl RatingIndex {
    pub fn from_ratings<F>(ratings: &[Rating<F>]) -> Self {
        let mut users = ratings.iter().map(|r| r.user).collect::<Vec<_>>();
        users.sort_unstable();
        users.dedup();

        let mut items = ratings.iter().map(|r| r.item).collect::<Vec<_>>();
        items.sort_unstable();
        items.dedup();

        let user_to_index = users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let item_to_index = items.iter().enumerate().map(|(i, &j)| (j, i)).collect();

        RatingIndex {
            users,
            items,
            user_to_index,
            item_to_index,
        }
    }

    /// Sorted distinct user identifiers
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Sorted distinct item identifiers
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn nusers(&self) -> usize {
        self.users.len()
    }

    pub fn nitems(&self) -> usize {
        self.items.len()
    }

    /// Dense position of `user`, `None` if it does not occur in the dataset
    pub fn user_index(&self, user: UserId) -> Option<usize> {
        self.user_to_index.get(&user).copied()
    }

    /// Dense position of `item`, `None` if it does not occur in the dataset
    pub fn item_index(&self, item: ItemId) -> Option<usize> {
        self.item_to_index.get(&item).copied()
    }

    /// Dense positions of both identifiers of a rating
    pub fn position<F>(&self, rating: &Rating<F>) -> Option<(usize, usize)> {
        Some((self.user_index(rating.user)?, self.item_index(rating.item)?))
    }
}

/// RatingDataset
///
/// This is the fundamental structure of the crate. It owns the full rating sequence, the
/// [`RatingIndex`] derived from it and a fixed fold assignment of its rows.
///
/// # Fields
///
/// * `ratings`: the observed ratings in source order
/// * `index`: sorted unique identifiers and their dense positions
/// * `splitter`: how the folds were drawn, reused when a subsample is taken
/// * `folds`: the test fold of every row
#[derive(Debug, Clone)]
pub struct RatingDataset<F> {
    ratings: Vec<Rating<F>>,
    index: RatingIndex,
    splitter: FoldSplitter,
    folds: Folds,
}

/// RatingsView
///
/// A read only view on some rows of a dataset. Views borrow the parent index, hence a training
/// and a test view of the same fold address users and items identically.
#[derive(Debug, Clone, Copy)]
pub struct RatingsView<'a, F> {
    ratings: &'a [Rating<F>],
    rows: Option<&'a [usize]>,
    index: &'a RatingIndex,
}
