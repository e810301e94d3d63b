//! `giggle-datasets` reads rating tables into [`giggle::RatingDataset`]s and generates synthetic
//! ones for tests and benchmarks.
//!
//! ## Rating files
//!
//! The Jester layout is one rating per line, `user item rating`, separated by tabs, commas or runs
//! of spaces and without a header. Files ending in `.gz` are decompressed on the fly.
//!
//! ```ignore
//! let ratings = giggle_datasets::load_ratings::<f64, _>("data/jester/jester_ratings.dat")?;
//! let dataset = giggle_datasets::jester("data/jester/jester_ratings.dat", FoldSplitter::new(10))?;
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use giggle::{Float, FoldSplitter, ItemId, Rating, RatingDataset, UserId};
use thiserror::Error;
use tracing::info;

pub mod generate;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read rating file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected `user item rating`, got {found:?}")]
    Malformed { line: u64, found: String },
    #[error(transparent)]
    BaseCrate(#[from] giggle::Error),
}

/// Read all ratings of a Jester style file, compressed or not
pub fn load_ratings<F: Float, P: AsRef<Path>>(path: P) -> Result<Vec<Rating<F>>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut contents = Vec::new();

    if path.extension().map_or(false, |ext| ext == "gz") {
        GzDecoder::new(file).read_to_end(&mut contents)?;
    } else {
        file.read_to_end(&mut contents)?;
    }

    let ratings = parse_ratings(&contents)?;
    info!(path = %path.display(), ratings = ratings.len(), "loaded rating file");

    Ok(ratings)
}

/// Load a Jester style rating file and fold it with `splitter`
pub fn jester<P: AsRef<Path>>(path: P, splitter: FoldSplitter) -> Result<RatingDataset<f64>> {
    let ratings = load_ratings(path)?;
    Ok(RatingDataset::new(ratings, splitter)?)
}

/// Parse `user item rating` lines
///
/// The separator is taken from the first line: tab, comma or otherwise space. Repeated separators
/// count as one, blank lines are skipped.
pub fn parse_ratings<F: Float>(buf: &[u8]) -> Result<Vec<Rating<F>>> {
    let first_line = buf.split(|&b| b == b'\n').find(|l| !l.is_empty());
    let delimiter = match first_line {
        Some(line) if line.contains(&b'\t') => b'\t',
        Some(line) if line.contains(&b',') => b',',
        _ => b' ',
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(buf);

    let mut ratings = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let fields = record.iter().filter(|f| !f.is_empty()).collect::<Vec<_>>();
        if fields.is_empty() {
            continue;
        }

        let malformed = || DatasetError::Malformed {
            line,
            found: fields.join(" "),
        };
        if fields.len() != 3 {
            return Err(malformed());
        }

        let user = fields[0].parse::<UserId>().map_err(|_| malformed())?;
        let item = fields[1].parse::<ItemId>().map_err(|_| malformed())?;
        let value = fields[2].parse::<f64>().map_err(|_| malformed())?;

        ratings.push(Rating::new(user, item, F::cast(value)));
    }

    Ok(ratings)
}
