//! Utility functions for randomly generating rating tables

use giggle::{FoldSplitter, Rating, RatingDataset};
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256Plus;

/// Folds of the datasets returned by [`biased_ratings`]
pub const NFOLDS: usize = 5;

/// Ratings following the additive bias model on the Jester scale
///
/// Every user gets a bias from `N(0, 2²)`, every item one from `N(0, 2²)` and each observed
/// rating is `1 + b_u + b_i + N(0, 1)`, clipped to `[-10, 10]`. A cell is observed with
/// probability `density`, and every user rates at least one item. The rows come out user by
/// user, items ascending.
pub fn biased_rating_list(
    nusers: usize,
    nitems: usize,
    density: f64,
    seed: u64,
) -> Vec<Rating<f64>> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let normal = |rng: &mut Xoshiro256Plus, std: f64| -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        std * z
    };

    let item_bias = (0..nitems)
        .map(|_| normal(&mut rng, 2.0))
        .collect::<Vec<f64>>();

    let mut ratings = Vec::new();
    for user in 0..nusers {
        let user_bias = normal(&mut rng, 2.0);
        let forced = rng.gen_range(0..nitems.max(1));

        for (item, b_i) in item_bias.iter().enumerate() {
            if item != forced && !rng.gen_bool(density.clamp(0.0, 1.0)) {
                continue;
            }
            let value = (1.0 + user_bias + b_i + normal(&mut rng, 1.0)).clamp(-10.0, 10.0);
            ratings.push(Rating::new(user as u32, item as u32, value));
        }
    }

    ratings
}

/// [`biased_rating_list`] folded into [`NFOLDS`] folds
pub fn biased_ratings(
    nusers: usize,
    nitems: usize,
    density: f64,
    seed: u64,
) -> giggle::Result<RatingDataset<f64>> {
    RatingDataset::new(
        biased_rating_list(nusers, nitems, density, seed),
        FoldSplitter::new(NFOLDS),
    )
}
