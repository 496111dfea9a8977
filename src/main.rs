#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod data;
mod ops;
mod prelude;
mod quantity;
mod tables;

use std::{fs::File, io::BufWriter};

use clap::{Parser, crate_version};

use crate::{
    cli::{AdaptArgs, Args, CalculateArgs, Command},
    core::{calculator::Calculator, report::LoadChange, series::slots_in_year},
    data::{catalog, results, series},
    prelude::*,
    tables::{build_records_table, build_skipped_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Calculate(args) => calculate(&args)?,
        Command::Adapt(args) => adapt(&args)?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(year = args.data.year))]
fn calculate(args: &CalculateArgs) -> Result {
    let metrics = args.try_metrics()?;
    let series = series::load(&args.data.data_dir, args.data.year)?;
    let measures = catalog::load(&args.data.measures_path())?;

    let report = Calculator::builder()
        .series(&series)
        .metrics(metrics)
        .combination(args.combination)
        .build()
        .run(&measures);

    println!("{}", build_records_table(&report.records));
    if !report.skipped.is_empty() {
        println!("{}", build_skipped_table(&report.skipped));
    }
    for metric in metrics {
        for load_change in [LoadChange::Reduction, LoadChange::Increase, LoadChange::Combination] {
            let total = report.total(load_change, metric);
            info!(%metric, %load_change, emission = %total.emission, cost = %total.cost, "total");
        }
    }

    results::save(&args.results_path(), args.format, args.data.year, &report)
}

#[instrument(skip_all, fields(year = args.data.year))]
fn adapt(args: &AdaptArgs) -> Result {
    let measures = catalog::load(&args.data.measures_path())?;
    std::fs::create_dir_all(&args.output.output_dir).with_context(|| {
        format!("failed to create `{}`", args.output.output_dir.display())
    })?;
    let path = args.output.output_dir.join(catalog::ADAPTED_FILE_NAME);
    let file =
        File::create(&path).with_context(|| format!("failed to create `{}`", path.display()))?;
    let n_rows =
        catalog::write_adapted(BufWriter::new(file), &measures, slots_in_year(args.data.year))?;
    info!(n_rows, path = %path.display(), "saved the adapted measures");
    Ok(())
}

