use approx::assert_abs_diff_eq;
use giggle::prelude::*;
use giggle_cli::{FittedRecommender, Recommender, RecommenderError};
use giggle_datasets::generate::biased_ratings;

fn evaluate(key: &str, dataset: &RatingDataset<f64>) -> CrossValidation<f64> {
    let recommender = Recommender::from_key(key).unwrap();
    cross_validate::<_, RecommenderError, _>(dataset, &recommender).unwrap()
}

#[test]
fn every_recommender_runs_over_all_folds() {
    let dataset = biased_ratings(120, 25, 0.4, 17).unwrap();

    for key in Recommender::KEYS {
        let result = evaluate(key, &dataset);
        assert_eq!(result.nfolds(), dataset.nfolds(), "{}", key);
        assert!(result.mean().is_finite(), "{}", key);
        assert!(result.std_error() >= 0.0, "{}", key);
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let dataset = biased_ratings(80, 20, 0.4, 2).unwrap();

    for key in Recommender::KEYS {
        assert_eq!(
            evaluate(key, &dataset).scores(),
            evaluate(key, &dataset).scores(),
            "{}",
            key
        );
    }
}

#[test]
fn personalised_models_beat_the_samplers() {
    let dataset = biased_ratings(300, 30, 0.5, 4).unwrap();

    let gaussian = evaluate("gaussian", &dataset).mean();
    let baseline = evaluate("baseline", &dataset).mean();
    let neigh = evaluate("neigh", &dataset).mean();

    assert!(baseline < gaussian);
    assert!(neigh < gaussian);
}

#[test]
fn bias_model_on_a_fold_uses_only_training_biases() {
    let ratings = vec![
        Rating::new(1, 1, 5.0),
        Rating::new(1, 2, 3.0),
        Rating::new(2, 1, 4.0),
        Rating::new(2, 2, 2.0),
    ];
    let dataset = RatingDataset::new(ratings, FoldSplitter::new(2)).unwrap();

    for fold in 0..2 {
        let (train, test) = dataset.load_fold(fold).unwrap();
        assert_eq!(test.len(), 2);

        let train = dataset.view_rows(&train);
        let model = match Recommender::from_key("baseline").unwrap().fit(&train).unwrap() {
            FittedRecommender::Baseline(model) => model,
            other => panic!("unexpected model {}", other.key()),
        };

        assert_abs_diff_eq!(model.mean(), train.mean().unwrap());
        for (user, item) in dataset.view_rows(&test).pairs() {
            assert_abs_diff_eq!(
                model.predict(user, item),
                model.mean() + model.user_bias(user) + model.item_bias(item)
            );
        }
    }
}

#[test]
fn fold_index_out_of_range() {
    let dataset = biased_ratings(20, 10, 0.5, 1).unwrap();
    let err = evaluate_fold::<_, RecommenderError, _>(
        &dataset,
        dataset.nfolds(),
        &Recommender::from_key("gaussian").unwrap(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        RecommenderError::BaseCrate(giggle::Error::FoldOutOfRange { .. })
    ));
}
