use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{
    core::{
        error::ConfigurationError,
        series::{Signal, YearSeries},
    },
    data::reader,
    prelude::*,
    quantity::{emission::EmissionFactor, price::MegawattHourPrice},
};

pub const AVERAGES_FILE_NAME: &str = "average_prices_and_emission_factors.csv";

#[must_use]
pub fn series_file_name(year: i32) -> String {
    format!("prices_and_emission_factors_{year}.csv")
}

#[derive(Deserialize)]
struct SlotRow {
    #[serde(alias = "Strompreis")]
    price: MegawattHourPrice,

    #[serde(alias = "CO₂-Emissionsfaktor des Strommix")]
    emission_factor: EmissionFactor,
}

#[derive(Deserialize)]
struct AverageRow {
    year: i32,
    price: MegawattHourPrice,
    emission_factor: EmissionFactor,
}

/// Load the quarter-hourly signals of the year and their averages from the data directory.
#[instrument(skip_all, fields(year = year))]
pub fn load(data_dir: &Path, year: i32) -> Result<YearSeries> {
    let averages_path = data_dir.join(AVERAGES_FILE_NAME);
    let averages_file = File::open(&averages_path)
        .with_context(|| format!("failed to open `{}`", averages_path.display()))?;
    let averages = read_averages(averages_file, year)?;
    info!(?averages, "loaded the yearly averages");

    let series_path = data_dir.join(series_file_name(year));
    if !series_path.is_file() {
        bail!(ConfigurationError::UnsupportedYear(year));
    }
    let series_file = File::open(&series_path)
        .with_context(|| format!("failed to open `{}`", series_path.display()))?;
    let slots = read_slots(series_file)
        .with_context(|| format!("failed to read `{}`", series_path.display()))?;
    info!(n_slots = slots.len(), "loaded the time series");

    Ok(YearSeries::try_new(year, slots, averages)?)
}

pub fn read_slots(inner: impl Read) -> Result<Vec<Signal>> {
    reader(inner)
        .deserialize::<SlotRow>()
        .enumerate()
        .map(|(index, row)| {
            let SlotRow { price, emission_factor } =
                row.with_context(|| format!("failed to read slot #{index}"))?;
            Ok(Signal { emission_factor, price })
        })
        .collect()
}

/// Find the averages of the year, the year must be listed.
pub fn read_averages(inner: impl Read, year: i32) -> Result<Signal> {
    for row in reader(inner).deserialize::<AverageRow>() {
        let row = row.context("failed to read the yearly averages")?;
        if row.year == year {
            return Ok(Signal { emission_factor: row.emission_factor, price: row.price });
        }
    }
    Err(ConfigurationError::UnsupportedYear(year).into())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_read_slots() {
        let csv = "timestamp;price;emission_factor\n2023-01-01 00:00;120.5;380\n2023-01-01 00:15; 99.0 ;410.5\n";
        let slots = read_slots(csv.as_bytes()).unwrap();
        assert_eq!(slots.len(), 2);
        assert_abs_diff_eq!(slots[0].price.0, 120.5);
        assert_abs_diff_eq!(slots[1].price.0, 99.0);
        assert_abs_diff_eq!(slots[1].emission_factor.0, 410.5);
    }

    #[test]
    fn test_read_slots_german_headers() {
        let csv = "Strompreis;CO₂-Emissionsfaktor des Strommix\n50;300\n";
        let slots = read_slots(csv.as_bytes()).unwrap();
        assert_abs_diff_eq!(slots[0].price.0, 50.0);
        assert_abs_diff_eq!(slots[0].emission_factor.0, 300.0);
    }

    #[test]
    fn test_read_slots_malformed() {
        let csv = "price;emission_factor\n50;oops\n";
        assert!(read_slots(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_averages() {
        let csv = "year;price;emission_factor\n2022;230.6;433\n2023;95.2;380.5\n";
        let averages = read_averages(csv.as_bytes(), 2023).unwrap();
        assert_abs_diff_eq!(averages.price.0, 95.2);
        assert_abs_diff_eq!(averages.emission_factor.0, 380.5);
    }

    #[test]
    fn test_read_averages_unsupported_year() {
        let csv = "year;price;emission_factor\n2022;230.6;433\n";
        let error = read_averages(csv.as_bytes(), 2021).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::UnsupportedYear(2021)),
        ));
    }
}
