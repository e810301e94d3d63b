use ndarray::{Array2, ArrayView1, ArrayView2};
use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{Float, RatingsView};

/// Dense user × item rating matrix
///
/// Rows follow the user positions and columns the item positions of the view's
/// [`RatingIndex`](super::RatingIndex). Every cell starts at the mean rating of the view and is
/// overwritten by the observed rating, if there is one. When a (user, item) pair occurs more than
/// once the last occurrence in view order wins. A second boolean matrix of the same shape records
/// which cells were observed.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix<F> {
    values: Array2<F>,
    observed: Array2<bool>,
    fill: F,
}

impl<F: Float> RatingMatrix<F> {
    /// Build the matrix of `view`, addressed through the view's index
    ///
    /// An empty view produces a matrix of zeros without any observed cell.
    pub fn from_view(view: &RatingsView<F>) -> Self {
        let index = view.index();
        let shape = (index.nusers(), index.nitems());
        let fill = view.mean().unwrap_or_else(F::zero);

        let mut values = Array2::from_elem(shape, fill);
        let mut observed = Array2::from_elem(shape, false);

        for rating in view.iter() {
            if let Some(position) = index.position(rating) {
                values[position] = rating.value;
                observed[position] = true;
            }
        }

        trace!(
            users = shape.0,
            items = shape.1,
            observed = view.len(),
            "rating matrix built"
        );

        RatingMatrix {
            values,
            observed,
            fill,
        }
    }

    /// Shape as (users, items)
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<F> {
        self.values.view()
    }

    pub fn observed(&self) -> ArrayView2<bool> {
        self.observed.view()
    }

    /// Value cells start from before being overwritten
    pub fn fill_value(&self) -> F {
        self.fill
    }

    pub fn get(&self, user: usize, item: usize) -> F {
        self.values[(user, item)]
    }

    pub fn is_observed(&self, user: usize, item: usize) -> bool {
        self.observed[(user, item)]
    }

    /// All ratings of the user at position `user`, imputed cells included
    pub fn user_row(&self, user: usize) -> ArrayView1<F> {
        self.values.row(user)
    }
}
