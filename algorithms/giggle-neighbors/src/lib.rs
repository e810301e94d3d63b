//! # Item neighbourhood
//!
//! `giggle-neighbors` implements item-to-item collaborative filtering. Fitting builds the dense
//! user × item matrix of the training ratings and the Pearson correlation of every pair of items
//! over the users who rated both. A rating is then estimated from the user's own ratings of the
//! items most similar to the queried one.
//!
//! ## Example
//!
//! ```rust
//! use giggle::prelude::*;
//! use giggle_neighbors::{ItemNeighborhood, ItemNeighborhoodParams};
//!
//! let ratings = (1..=6u32)
//!     .flat_map(|u| vec![Rating::new(u, 1, u as f64), Rating::new(u, 2, u as f64 + 1.0)])
//!     .collect();
//! let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();
//!
//! let model: ItemNeighborhood<f64> = ItemNeighborhoodParams::new().fit(&dataset.view()).unwrap();
//! assert_eq!(model.similarity()[(0, 1)], 1.0);
//! ```
mod algorithm;
mod error;
mod hyperparams;
mod similarity;

pub use algorithm::ItemNeighborhood;
pub use error::{NeighborsError, Result};
pub use hyperparams::{ItemNeighborhoodParams, ItemNeighborhoodValidParams};
pub use similarity::pearson_similarity;
