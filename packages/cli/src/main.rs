#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime rate predictor.
//!
//! `crime_rate predict` runs a single prediction from flags,
//! `crime_rate cities` and `crime_rate crime-types` list the catalogs, and
//! running with no subcommand (or `interactive`) walks the user through
//! the selections with `dialoguer` menus.
//!
//! Prediction errors never escape as panics: they are logged and printed
//! as user-facing messages, and one-shot commands exit non-zero.

mod interactive;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crime_rate_cli_utils::MultiProgress;
use crime_rate_prediction::{PredictionEngine, PredictionInput, paths};
use crime_rate_reference::{CatalogEntry, city_catalog, crime_type_catalog};

#[derive(Parser)]
#[command(name = "crime_rate", about = "Crime rate predictor for Indian metropolitan cities")]
struct Cli {
    /// Model artifact to load (defaults to `$CRIME_RATE_MODEL_PATH`, then
    /// `data/model.json`)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the crime rate for one city, crime type, and year
    Predict {
        /// City name, exactly as listed by `cities`
        #[arg(long)]
        city: String,
        /// Crime type, exactly as listed by `crime-types`
        #[arg(long)]
        crime_type: String,
        /// Target year
        #[arg(long)]
        year: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the supported cities with their 2011 population
    Cities {
        #[arg(long)]
        json: bool,
    },
    /// List the supported crime types
    CrimeTypes {
        #[arg(long)]
        json: bool,
    },
    /// Choose inputs from menus
    Interactive,
}

/// Whether a command completed its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => Self::SUCCESS,
            Outcome::Failed => Self::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let multi = crime_rate_cli_utils::init_logger();
    let cli = Cli::parse();

    match run(cli, &multi) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, multi: &MultiProgress) -> Result<Outcome, Box<dyn std::error::Error>> {
    let model_path = cli.model.unwrap_or_else(paths::model_path);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Predict {
            city,
            crime_type,
            year,
            json,
        } => {
            let engine = load_engine(&model_path, multi)?;
            let input = PredictionInput::new(city, crime_type, year);
            match engine.predict_input(&input) {
                Ok(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("{result}");
                    }
                    Ok(Outcome::Done)
                }
                Err(e) => {
                    log::error!("Prediction failed: {e}");
                    eprintln!("{}", e.user_message());
                    Ok(Outcome::Failed)
                }
            }
        }
        Commands::Cities { json } => {
            print_catalog(&city_catalog(), json)?;
            Ok(Outcome::Done)
        }
        Commands::CrimeTypes { json } => {
            print_catalog(&crime_type_catalog(), json)?;
            Ok(Outcome::Done)
        }
        Commands::Interactive => {
            let engine = load_engine(&model_path, multi)?;
            interactive::run(&engine)?;
            Ok(Outcome::Done)
        }
    }
}

/// Loads the model behind a spinner and wraps it in an engine.
fn load_engine(
    path: &std::path::Path,
    multi: &MultiProgress,
) -> Result<PredictionEngine, Box<dyn std::error::Error>> {
    let bar = crime_rate_cli_utils::spinner(multi, "Loading model...");
    let model = crime_rate_prediction::load_model(path);
    bar.finish_and_clear();

    let model = model.map_err(|e| format!("Could not load model from {}: {e}", path.display()))?;
    Ok(PredictionEngine::new(model))
}

fn print_catalog(entries: &[CatalogEntry], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    for entry in entries {
        match entry.base_population_lakhs {
            Some(population) => println!(
                "{:>2}  {:<30} {population:>7.2} lakhs",
                entry.code, entry.name
            ),
            None => println!("{:>2}  {}", entry.code, entry.name),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["crime_rate"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn parses_predict_flags() {
        let cli = Cli::try_parse_from([
            "crime_rate",
            "predict",
            "--city",
            "Mumbai",
            "--crime-type",
            "Crime against women",
            "--year",
            "2030",
            "--model",
            "/tmp/forest.json",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.model, Some(PathBuf::from("/tmp/forest.json")));
        match cli.command {
            Some(Commands::Predict {
                city,
                crime_type,
                year,
                json,
            }) => {
                assert_eq!(city, "Mumbai");
                assert_eq!(crime_type, "Crime against women");
                assert_eq!(year, "2030");
                assert!(json);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn predict_requires_every_flag() {
        assert!(Cli::try_parse_from(["crime_rate", "predict", "--city", "Pune"]).is_err());
    }

    #[test]
    fn listing_catalogs_needs_no_model() {
        let cli = Cli::try_parse_from(["crime_rate", "cities", "--model", "/nonexistent"]).unwrap();
        let outcome = run(cli, &MultiProgress::new()).unwrap();
        assert_eq!(outcome, Outcome::Done);
    }

    #[test]
    fn missing_model_is_an_error_not_a_panic() {
        let cli = Cli::try_parse_from([
            "crime_rate",
            "predict",
            "--city",
            "Pune",
            "--crime-type",
            "Murder",
            "--year",
            "2020",
            "--model",
            "/nonexistent/model.json",
        ])
        .unwrap();
        let err = run(cli, &MultiProgress::new()).unwrap_err();
        assert!(err.to_string().contains("Could not load model"));
    }

    #[test]
    fn bad_year_exits_with_failure() {
        let cli = Cli::try_parse_from([
            "crime_rate",
            "predict",
            "--city",
            "Pune",
            "--crime-type",
            "Murder",
            "--year",
            "soon",
        ])
        .unwrap();
        let outcome = run(cli, &MultiProgress::new()).unwrap();
        assert_eq!(outcome, Outcome::Failed);
    }
}
