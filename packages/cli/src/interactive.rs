//! Interactive mode.
//!
//! Offers the catalogs and year range as `dialoguer` menus, so every
//! selection is a catalog member, then prints the prediction and offers to
//! run another.

use crime_rate_prediction::{PredictionEngine, PredictionInput};
use crime_rate_reference::{City, CrimeType, YEAR_OPTIONS};
use dialoguer::{Confirm, Select};

/// Runs the prediction menu until the user declines another round.
///
/// Prediction errors are shown to the user and the loop continues.
///
/// # Errors
///
/// Returns an error only if the terminal prompts themselves fail.
pub fn run(engine: &PredictionEngine) -> Result<(), dialoguer::Error> {
    println!("Crime Rate Predictor");
    println!("Unlock Safety: Reduce Crime Rate Together");
    println!();

    let cities: Vec<&str> = City::all().iter().map(|city| city.name()).collect();
    let crime_types: Vec<&str> = CrimeType::all().iter().map(|crime| crime.name()).collect();
    let years: Vec<String> = YEAR_OPTIONS.map(|year| year.to_string()).collect();

    loop {
        let city = Select::new()
            .with_prompt("Select city")
            .items(&cities)
            .default(0)
            .interact()?;

        let crime_type = Select::new()
            .with_prompt("Select crime type")
            .items(&crime_types)
            .default(0)
            .interact()?;

        let year = Select::new()
            .with_prompt("Select year")
            .items(&years)
            .default(0)
            .interact()?;

        let input = PredictionInput::new(cities[city], crime_types[crime_type], &years[year]);

        println!();
        match engine.predict_input(&input) {
            Ok(result) => println!("{result}"),
            Err(e) => {
                log::warn!("Prediction failed: {e}");
                println!("{}", e.user_message());
            }
        }
        println!();

        if !Confirm::new()
            .with_prompt("Predict another?")
            .default(true)
            .interact()?
        {
            return Ok(());
        }
    }
}
