use giggle::ParamGuard;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::NeighborsError;

/// A verified hyper-parameter set of the neighbourhood model
///
/// See [`ItemNeighborhoodParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemNeighborhoodValidParams {
    pub(crate) k: usize,
    pub(crate) min_support: usize,
}

impl ItemNeighborhoodValidParams {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn min_support(&self) -> usize {
        self.min_support
    }
}

/// Hyper-parameters of the neighbourhood model
///
/// `k` bounds the number of rated neighbours averaged per prediction, `min_support` is the
/// number of users that must have rated both items of a pair before their correlation counts.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemNeighborhoodParams(pub(crate) ItemNeighborhoodValidParams);

impl Default for ItemNeighborhoodParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemNeighborhoodParams {
    pub fn new() -> Self {
        Self(ItemNeighborhoodValidParams {
            k: 35,
            min_support: 5,
        })
    }

    /// Set the number of neighbours.
    ///
    /// Defaults to `35` if not set
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;
        self
    }

    /// Set the minimal number of co-rating users.
    ///
    /// Defaults to `5` if not set
    pub fn min_support(mut self, min_support: usize) -> Self {
        self.0.min_support = min_support;
        self
    }
}

impl ParamGuard for ItemNeighborhoodParams {
    type Checked = ItemNeighborhoodValidParams;
    type Error = NeighborsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.k == 0 {
            Err(NeighborsError::InvalidNeighbors)
        } else if self.0.min_support < 2 {
            Err(NeighborsError::InvalidSupport(self.0.min_support))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
