use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        direction::Direction,
        measure::{Measure, Retrieval, RetrievalParameters},
        series::SLOT_DURATION,
        variant::{Maximization, Scope, Variant},
    },
    data::{reader, writer},
    prelude::*,
    quantity::{power::Kilowatts, time::Hours},
};

pub const ADAPTED_FILE_NAME: &str = "adapted_measures.csv";

/// One load direction of a measure.
#[derive(Deserialize)]
struct CatalogRow {
    measure: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    scope: Option<Scope>,

    #[serde(default)]
    maximization: Option<Maximization>,

    load_change: Direction,
    power: Kilowatts,
    retrieval_duration: Hours,
    activation_duration: Option<Hours>,
    catch_up_time: Option<Hours>,
    retrieval_frequency: i64,
    combinable: Option<bool>,
}

impl CatalogRow {
    const fn variant(&self) -> Variant {
        Variant { scope: self.scope, maximization: self.maximization }
    }

    fn parameters(&self) -> RetrievalParameters {
        RetrievalParameters::builder()
            .power(self.power)
            .duration(self.retrieval_duration)
            .activation(self.activation_duration.unwrap_or_default())
            .catch_up(self.catch_up_time.unwrap_or_default())
            .frequency(self.retrieval_frequency)
            .build()
    }
}

#[derive(Serialize)]
struct AdaptedRow<'a> {
    measure: &'a str,
    name: &'a str,
    scope: Option<Scope>,
    maximization: Option<Maximization>,
    load_change: Direction,
    power: Kilowatts,
    retrieval_duration: Hours,
    cycle_duration: Hours,
    retrieval_frequency: usize,
    combinable: bool,
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Vec<Measure>> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let measures = read(file).with_context(|| format!("failed to read `{}`", path.display()))?;
    info!(n_measures = measures.len(), "loaded the measures");
    Ok(measures)
}

/// Read the catalog, merging the rows of the same measure and case in the order of appearance.
pub fn read(inner: impl Read) -> Result<Vec<Measure>> {
    let mut measures: Vec<Measure> = Vec::new();
    for (index, row) in reader(inner).deserialize::<CatalogRow>().enumerate() {
        let row = row.with_context(|| format!("failed to read row #{index}"))?;
        let variant = row.variant();
        let position = if let Some(position) = measures
            .iter()
            .position(|measure| measure.id == row.measure && measure.variant == variant)
        {
            position
        } else {
            measures.push(
                Measure::builder()
                    .id(row.measure.as_str())
                    .name(row.name.as_str())
                    .variant(variant)
                    .build(),
            );
            measures.len() - 1
        };
        let measure = &mut measures[position];
        let parameters = measure.parameters_mut(row.load_change);
        ensure!(
            parameters.is_none(),
            "measure `{}` ({variant}) defines the load {} more than once",
            row.measure,
            row.load_change,
        );
        *parameters = Some(row.parameters());
        measure.combinable |= row.combinable.unwrap_or_default();
    }
    Ok(measures)
}

/// Write the parameters quantized onto the slot grid, skipping the implausible ones.
///
/// Returns the number of written rows.
pub fn write_adapted(
    inner: impl Write,
    measures: &[Measure],
    n_year_slots: usize,
) -> Result<usize> {
    let mut writer = writer(inner);
    let mut n_rows = 0;
    for measure in measures {
        for (direction, parameters) in measure.directions() {
            let retrieval = match Retrieval::try_adapt(parameters, direction, n_year_slots) {
                Ok(retrieval) => retrieval,
                Err(error) => {
                    warn!(measure = %measure.id, "skipping: {error}");
                    continue;
                }
            };
            #[expect(clippy::cast_precision_loss)]
            let (retrieval_duration, cycle_duration) = (
                SLOT_DURATION * retrieval.duration as f64,
                SLOT_DURATION * retrieval.cycle as f64,
            );
            writer.serialize(AdaptedRow {
                measure: &measure.id,
                name: &measure.name,
                scope: measure.variant.scope,
                maximization: measure.variant.maximization,
                load_change: direction,
                power: retrieval.power,
                retrieval_duration,
                cycle_duration,
                retrieval_frequency: retrieval.frequency,
                combinable: measure.combinable,
            })?;
            n_rows += 1;
        }
    }
    writer.flush()?;
    Ok(n_rows)
}
