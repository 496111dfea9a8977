use std::{
    fs::{File, create_dir_all},
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    core::{
        metric::Metric,
        report::{LoadChange, Record, Report},
        variant::{Maximization, Scope},
    },
    data::headless_writer,
    prelude::*,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Column names of [`ResultRow`], in the order of its fields.
const RESULT_HEADER: [&str; 9] = [
    "measure",
    "name",
    "scope",
    "maximization",
    "load_change",
    "optimized_for",
    "co2_savings_kg",
    "cost_savings_eur",
    "activations",
];

#[derive(Serialize)]
struct ResultRow<'a> {
    measure: &'a str,
    name: &'a str,
    scope: Option<Scope>,
    maximization: Option<Maximization>,
    load_change: LoadChange,
    optimized_for: Metric,
    co2_savings_kg: f64,
    cost_savings_eur: f64,
    activations: usize,
}

impl<'a> From<&'a Record> for ResultRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            measure: &record.measure,
            name: &record.name,
            scope: record.variant.scope,
            maximization: record.variant.maximization,
            load_change: record.load_change,
            optimized_for: record.metric,
            co2_savings_kg: record.savings.emission.0,
            cost_savings_eur: record.savings.cost.0,
            activations: record.n_activations,
        }
    }
}

#[derive(Serialize)]
struct SkippedRow<'a> {
    measure: &'a str,
    scope: Option<Scope>,
    maximization: Option<Maximization>,
    error: String,
}

#[derive(Serialize)]
struct Document<'a> {
    year: i32,
    results: Vec<ResultRow<'a>>,
    skipped: Vec<SkippedRow<'a>>,
}

/// Save the report into the file, creating the parent directories as needed.
#[instrument(skip_all, fields(path = %path.display(), ?format))]
pub fn save(path: &Path, format: Format, year: i32, report: &Report) -> Result {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    let inner = BufWriter::new(file);
    match format {
        Format::Csv => write_csv(inner, report)?,
        Format::Json => write_json(inner, year, report)?,
    }
    info!("saved the results");
    Ok(())
}

/// Write the records, the skipped measures are only logged.
///
/// The header is always written, even when there are no records.
pub fn write_csv(inner: impl Write, report: &Report) -> Result {
    let mut writer = headless_writer(inner);
    writer.write_record(RESULT_HEADER)?;
    for record in &report.records {
        writer.serialize(ResultRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json(mut inner: impl Write, year: i32, report: &Report) -> Result {
    let document = Document {
        year,
        results: report.records.iter().map(ResultRow::from).collect(),
        skipped: report
            .skipped
            .iter()
            .map(|skipped| SkippedRow {
                measure: &skipped.measure,
                scope: skipped.variant.scope,
                maximization: skipped.variant.maximization,
                error: skipped.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut inner, &document)?;
    inner.flush()?;
    Ok(())
}
