use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use giggle::dataset::DEFAULT_SEED;
use giggle::evaluation::cross_validate;
use giggle::traits::Predict;
use giggle::{FoldSplitter, ItemId, RatingDataset, UserId};
use giggle_cli::persistence::{self, DEFAULT_DIR};
use giggle_cli::{Recommender, RecommenderError};
use tracing::info;

#[derive(Parser)]
#[command(name = "giggle")]
#[command(about = "Joke rating estimators and their k-fold evaluation")]
struct Cli {
    /// Show more output, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cross-validate a recommender and print the error of every fold
    Evaluate {
        /// Rating file, `user item rating` per line, optionally gzip compressed
        #[arg(short = 'd', long)]
        ratings: PathBuf,

        /// One of gaussian, beta, baseline, neigh
        #[arg(short, long, default_value = "baseline")]
        recommender: Recommender,

        /// Number of folds
        #[arg(short = 'k', long, default_value_t = 10)]
        folds: usize,

        /// Keep only this many randomly chosen users
        #[arg(long)]
        subsample_users: Option<usize>,

        /// Seed of the fold assignment, the user subsample and the samplers
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Fit a recommender on all ratings and store it
    Train {
        /// Rating file, `user item rating` per line, optionally gzip compressed
        #[arg(short = 'd', long)]
        ratings: PathBuf,

        /// One of gaussian, beta, baseline, neigh
        #[arg(short, long)]
        recommender: Recommender,

        /// Directory of stored models
        #[arg(short, long, default_value = DEFAULT_DIR)]
        models: PathBuf,
    },
    /// Estimate a single rating with a stored recommender
    Predict {
        /// One of gaussian, beta, baseline, neigh
        #[arg(short, long)]
        recommender: Recommender,

        /// Directory of stored models
        #[arg(short, long, default_value = DEFAULT_DIR)]
        models: PathBuf,

        #[arg(short, long)]
        user: UserId,

        #[arg(short, long)]
        item: ItemId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Evaluate {
            ratings,
            recommender,
            folds,
            subsample_users,
            seed,
        } => {
            let ratings = giggle_datasets::load_ratings::<f64, _>(&ratings)
                .with_context(|| format!("reading {}", ratings.display()))?;
            let mut dataset = RatingDataset::new(ratings, FoldSplitter::new(folds).seed(seed))?;
            if let Some(nusers) = subsample_users {
                dataset = dataset.subsample_users(nusers, seed)?;
            }

            let recommender = recommender.seed(seed);
            info!(%recommender, folds, "evaluating");
            let result = cross_validate::<_, RecommenderError, _>(&dataset, &recommender)?;

            println!("{}", result.table());
        }
        Command::Train {
            ratings,
            recommender,
            models,
        } => {
            let ratings = giggle_datasets::load_ratings::<f64, _>(&ratings)
                .with_context(|| format!("reading {}", ratings.display()))?;
            let model = recommender.fit_ratings(&ratings)?;
            let path = persistence::save(&models, &model)
                .with_context(|| format!("saving to {}", models.display()))?;

            println!("{}", path.display());
        }
        Command::Predict {
            recommender,
            models,
            user,
            item,
        } => {
            let model = persistence::load(&models, recommender.key())
                .with_context(|| format!("loading `{}` from {}", recommender, models.display()))?;

            println!("{:.4}", model.predict(user, item));
        }
    }

    Ok(())
}
