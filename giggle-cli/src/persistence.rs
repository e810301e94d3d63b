//! Storing fitted recommenders on disk
//!
//! Every model lives in `<dir>/<key>.bin`, encoded with `bincode`. Saving a model replaces the
//! previous one of the same key.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::registry::{FittedRecommender, Recommender, RecommenderError, Result};

/// Default directory of stored models
pub const DEFAULT_DIR: &str = "data/models";

/// Location of the model stored under `key`
pub fn model_path<P: AsRef<Path>>(dir: P, key: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.bin", key))
}

/// Write `model` to `<dir>/<key>.bin`, creating `dir` if needed
pub fn save<P: AsRef<Path>>(dir: P, model: &FittedRecommender) -> Result<PathBuf> {
    fs::create_dir_all(dir.as_ref())?;
    let path = model_path(dir, model.key());

    let writer = BufWriter::new(File::create(&path)?);
    bincode::serialize_into(writer, model)?;

    info!(path = %path.display(), recommender = model.key(), "model saved");
    Ok(path)
}

/// Read the model stored under `key`
///
/// Fails for keys outside the registry and for files holding a model of another variant.
pub fn load<P: AsRef<Path>>(dir: P, key: &str) -> Result<FittedRecommender> {
    let expected = Recommender::from_key(key)?.key();
    let path = model_path(dir, key);

    let reader = BufReader::new(File::open(&path)?);
    let model: FittedRecommender = bincode::deserialize_from(reader)?;

    if model.key() != expected {
        return Err(RecommenderError::KeyMismatch {
            expected,
            found: model.key(),
        });
    }

    info!(path = %path.display(), recommender = expected, "model loaded");
    Ok(model)
}
