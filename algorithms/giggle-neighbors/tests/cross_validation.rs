use approx::assert_abs_diff_eq;
use giggle::prelude::*;
use giggle_datasets::generate::biased_ratings;
use giggle_neighbors::{ItemNeighborhood, ItemNeighborhoodParams, NeighborsError};

#[test]
fn cross_validation_is_reproducible() {
    let dataset = biased_ratings(150, 30, 0.4, 21).unwrap();
    let params = ItemNeighborhoodParams::new().k(10);

    let first: CrossValidation<f64> =
        cross_validate::<_, NeighborsError, _>(&dataset, &params).unwrap();
    let second = dataset
        .cross_validate::<NeighborsError, _>(&params)
        .unwrap();

    assert_eq!(first.nfolds(), dataset.nfolds());
    assert_eq!(first.scores(), second.scores());
    assert!(first.scores().iter().all(|s| s.is_finite() && *s > 0.0));
}

#[test]
fn beats_the_global_mean_on_structured_ratings() {
    let dataset = biased_ratings(300, 30, 0.5, 4).unwrap();
    let (train, test) = dataset.load_fold(0).unwrap();
    let (train, test) = (dataset.view_rows(&train), dataset.view_rows(&test));

    let model: ItemNeighborhood<f64> = ItemNeighborhoodParams::new().fit(&train).unwrap();
    let predicted = test.rmse(&model.predict_many(&test.pairs()));

    let mean = ndarray::Array1::from_elem(test.len(), train.mean().unwrap());
    assert!(predicted < test.rmse(&mean));
}

#[test]
fn similarity_survives_the_fold_split() {
    let dataset = biased_ratings(80, 20, 0.5, 8).unwrap();
    let (train, _) = dataset.load_fold(2).unwrap();
    let model: ItemNeighborhood<f64> = ItemNeighborhoodParams::new()
        .fit(&dataset.view_rows(&train))
        .unwrap();

    let sims = model.similarity();
    assert_eq!(
        model.rating_matrix().dim(),
        (dataset.nusers(), dataset.nitems())
    );
    assert_abs_diff_eq!(sims, sims.t(), epsilon = 1e-12);
    assert!(sims.diag().iter().all(|&d| d == 1.0));
}
