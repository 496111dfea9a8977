use bon::Builder;
use enumset::EnumSet;

use crate::{
    core::{
        block::{Block, segment},
        combiner::{Lane, combine},
        direction::Direction,
        error::MeasureError,
        measure::{Measure, Retrieval},
        metric::Metric,
        report::{LoadChange, Record, Report, Skipped},
        savings::Savings,
        scorer::score,
        selection::{Selection, rank},
        series::YearSeries,
    },
    prelude::*,
};

/// Annual reduction potential calculator over one year of signals.
#[must_use]
#[derive(Builder)]
pub struct Calculator<'a> {
    series: &'a YearSeries,

    /// Metrics to optimize the activations for.
    metrics: EnumSet<Metric>,

    /// Also schedule reduction and increase together where the measure allows it.
    #[builder(default)]
    combination: bool,
}

/// Blocks of one direction segmented per metric.
struct Lanes {
    direction: Direction,
    retrieval: Retrieval,
    blocks: Vec<(Metric, Vec<Block>)>,
}

impl Lanes {
    fn blocks(&self, metric: Metric) -> &[Block] {
        self.blocks
            .iter()
            .find(|(it, _)| *it == metric)
            .map(|(_, blocks)| blocks.as_slice())
            .unwrap_or_default()
    }
}

impl Calculator<'_> {
    /// Calculate all the measures, skipping the ones with implausible parameters.
    #[instrument(skip_all, fields(year = self.series.year(), n_measures = measures.len()))]
    pub fn run(&self, measures: &[Measure]) -> Report {
        let mut report = Report::default();
        for measure in measures {
            match self.calculate(measure) {
                Ok(records) => report.records.extend(records),
                Err(error) => {
                    warn!(measure = %measure.id, variant = %measure.variant, "skipping: {error}");
                    report.skipped.push(Skipped {
                        measure: measure.id.clone(),
                        variant: measure.variant,
                        error,
                    });
                }
            }
        }
        info!(n_records = report.records.len(), n_skipped = report.skipped.len(), "done");
        report
    }

    /// Calculate the records of a single measure.
    #[instrument(skip_all, fields(measure = %measure.id, variant = %measure.variant))]
    pub fn calculate(&self, measure: &Measure) -> Result<Vec<Record>, MeasureError> {
        if measure.capability().is_empty() {
            return Err(MeasureError::NoDirection);
        }
        let n_year_slots = self.series.len();
        let retrievals = measure
            .directions()
            .map(|(direction, parameters)| {
                Retrieval::try_adapt(parameters, direction, n_year_slots)
                    .map(|retrieval| (direction, retrieval))
            })
            .collect::<Result<Vec<_>, MeasureError>>()?;

        let lanes: Vec<Lanes> = retrievals
            .into_iter()
            .map(|(direction, retrieval)| {
                let scored =
                    score(self.series.slots(), self.series.averages(), direction, &retrieval);
                let blocks = self
                    .metrics
                    .iter()
                    .map(|metric| (metric, segment(&scored, n_year_slots, &retrieval, metric)))
                    .collect();
                Lanes { direction, retrieval, blocks }
            })
            .collect();

        let mut records = Vec::new();
        for lanes in &lanes {
            for metric in self.metrics {
                let selection =
                    Selection::top(lanes.blocks(metric), lanes.retrieval.frequency, metric);
                records.push(self.record(
                    measure,
                    LoadChange::from(lanes.direction),
                    metric,
                    selection.total(),
                    selection.len(),
                ));
            }
        }

        if let [reduction, increase] = lanes.as_slice()
            && self.is_combinable(measure, &reduction.retrieval, &increase.retrieval)
        {
            for metric in self.metrics {
                let combination = combine(
                    &Lane {
                        candidates: rank(reduction.blocks(metric), metric),
                        capacity: reduction.retrieval.frequency,
                    },
                    &Lane {
                        candidates: rank(increase.blocks(metric), metric),
                        capacity: increase.retrieval.frequency,
                    },
                    metric,
                );
                records.push(self.record(
                    measure,
                    LoadChange::Combination,
                    metric,
                    combination.total(),
                    combination.len(),
                ));
            }
        }

        Ok(records)
    }

    fn is_combinable(&self, measure: &Measure, reduction: &Retrieval, increase: &Retrieval) -> bool {
        if !self.combination {
            return false;
        }
        if !measure.combinable {
            debug!("the measure is not flagged as combinable");
            return false;
        }
        if reduction.cycle != increase.cycle {
            debug!(
                reduction = reduction.cycle,
                increase = increase.cycle,
                "the retrieval cycles differ, not combining",
            );
            return false;
        }
        true
    }

    fn record(
        &self,
        measure: &Measure,
        load_change: LoadChange,
        metric: Metric,
        savings: Savings,
        n_activations: usize,
    ) -> Record {
        debug!(year = self.series.year(), %load_change, %metric, ?savings, n_activations, "calculated");
        Record {
            measure: measure.id.clone(),
            name: measure.name.clone(),
            variant: measure.variant,
            load_change,
            metric,
            savings,
            n_activations,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::{
        core::{
            measure::RetrievalParameters,
            series::{Signal, slots_in_year},
            variant::{Maximization, Scope, Variant},
        },
        quantity::{
            emission::EmissionFactor,
            power::Kilowatts,
            price::MegawattHourPrice,
            time::Hours,
        },
    };

    const YEAR: i32 = 2023;

    /// Daily cycle: dirty and expensive evenings, clean and cheap middays.
    fn series() -> YearSeries {
        let slots = (0..slots_in_year(YEAR))
            .map(|slot| {
                let hour = (slot % 96) / 4;
                let day = slot / 96;
                #[expect(clippy::cast_precision_loss)]
                let drift = (day % 7) as f64;
                let (emission_factor, price) = match hour {
                    11..=13 => (200.0 - drift, 40.0 + drift),
                    18..=21 => (500.0 + drift, 160.0 - drift),
                    _ => (350.0, 100.0),
                };
                Signal {
                    emission_factor: EmissionFactor(emission_factor),
                    price: MegawattHourPrice(price),
                }
            })
            .collect();
        YearSeries::try_new(
            YEAR,
            slots,
            Signal { emission_factor: EmissionFactor(350.0), price: MegawattHourPrice(100.0) },
        )
        .unwrap()
    }

    fn parameters(duration: f64, frequency: i64) -> RetrievalParameters {
        RetrievalParameters::builder()
            .power(Kilowatts(100.0))
            .duration(Hours(duration))
            .frequency(frequency)
            .build()
    }

    fn measure(id: &str, frequency: i64) -> Measure {
        Measure::builder()
            .id(id)
            .reduction(parameters(2.0, frequency))
            .increase(parameters(2.0, frequency))
            .combinable(true)
            .build()
    }

    fn find(report: &Report, measure: &str, load_change: LoadChange, metric: Metric) -> Record {
        report
            .records
            .iter()
            .find(|record| {
                record.measure == measure && record.load_change == load_change && record.metric == metric
            })
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_records() {
        let series = series();
        let calculator =
            Calculator::builder().series(&series).metrics(EnumSet::all()).combination(true).build();
        let records = calculator.calculate(&measure("A", 10)).unwrap();
        // Two directions plus the combination, for both metrics:
        assert_eq!(records.len(), 6);

        let reduction = records
            .iter()
            .find(|record| record.load_change == LoadChange::Reduction && record.metric == Metric::Co2)
            .unwrap();
        assert_eq!(reduction.n_activations, 10);
        // 10 × 200 kWh at 156 g/kWh above the average:
        assert_abs_diff_eq!(reduction.savings.emission.0, 312.0, epsilon = 1e-6);
        // Associated cost savings at 54 €/MWh:
        assert_abs_diff_eq!(reduction.savings.cost.0, 108.0, epsilon = 1e-6);
    }

    #[test]
    fn test_associated_metric_differs() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(EnumSet::all()).build();
        let records = calculator.calculate(&measure("A", 1)).unwrap();
        let by_co2 = &records[0];
        let by_cost = &records[1];
        assert_eq!((by_co2.metric, by_cost.metric), (Metric::Co2, Metric::Cost));
        assert_abs_diff_eq!(by_co2.savings.emission.0, 0.2 * 156.0, epsilon = 1e-6);
        assert_abs_diff_eq!(by_co2.savings.cost.0, 0.2 * 54.0, epsilon = 1e-6);
        assert_abs_diff_eq!(by_cost.savings.cost.0, 0.2 * 60.0, epsilon = 1e-6);
        assert_abs_diff_eq!(by_cost.savings.emission.0, 0.2 * 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_order_independence_and_idempotence() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(EnumSet::all()).build();
        let measures = [measure("A", 5), measure("B", 50), measure("C", 365)];
        let forward = calculator.run(&measures);
        let backward = calculator.run(&measures.iter().rev().cloned().collect_vec());
        let again = calculator.run(&measures);
        assert_eq!(forward.records, again.records);
        for id in ["A", "B", "C"] {
            assert_eq!(
                find(&forward, id, LoadChange::Reduction, Metric::Co2),
                find(&backward, id, LoadChange::Reduction, Metric::Co2),
            );
        }
    }

    #[test]
    fn test_monotonic_in_frequency() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(Metric::Co2.into()).build();
        let totals = [0, 1, 10, 100, 365, 1000, 5000]
            .into_iter()
            .map(|frequency| {
                let records = calculator.calculate(&measure("A", frequency)).unwrap();
                records[0].savings.emission
            })
            .collect_vec();
        assert_abs_diff_eq!(totals[0].0, 0.0);
        assert!(totals.iter().tuple_windows().all(|(lhs, rhs)| lhs <= rhs));
    }

    #[test]
    fn test_all_negative() {
        let slots = vec![Signal::default(); slots_in_year(YEAR)];
        let averages =
            Signal { emission_factor: EmissionFactor(100.0), price: MegawattHourPrice(50.0) };
        let series = YearSeries::try_new(YEAR, slots, averages).unwrap();
        let measure = Measure::builder().id("A").reduction(parameters(1.0, 100)).build();
        let records = Calculator::builder()
            .series(&series)
            .metrics(EnumSet::all())
            .build()
            .calculate(&measure)
            .unwrap();
        for record in records {
            assert_eq!(record.n_activations, 0);
            assert_abs_diff_eq!(record.savings.emission.0, 0.0);
            assert_abs_diff_eq!(record.savings.cost.0, 0.0);
        }
    }

    #[test]
    fn test_whole_year_window() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(Metric::Co2.into()).build();
        let measure = Measure::builder()
            .id("A")
            .reduction(parameters(8760.0, 10))
            .increase(parameters(8760.0, 10))
            .build();
        let records = calculator.calculate(&measure).unwrap();
        // The whole year sums up to a positive excess, so only the reduction is activated once:
        assert_eq!(records[0].n_activations, 1);
        assert!(records[0].savings.emission.is_positive());
        assert_eq!(records[1].n_activations, 0);
    }

    #[test]
    fn test_combination_bounds() {
        let series = series();
        let calculator =
            Calculator::builder().series(&series).metrics(EnumSet::all()).combination(true).build();
        for frequency in [1, 30, 365, 1000] {
            let records = calculator.calculate(&measure("A", frequency)).unwrap();
            for metric in [Metric::Co2, Metric::Cost] {
                let score = |load_change: LoadChange| {
                    records
                        .iter()
                        .find(|record| record.load_change == load_change && record.metric == metric)
                        .unwrap()
                        .savings
                        .score(metric)
                        .0
                };
                let reduction = score(LoadChange::Reduction);
                let increase = score(LoadChange::Increase);
                let combination = score(LoadChange::Combination);
                assert!(combination >= reduction.max(increase) - 1e-6);
                assert!(combination <= reduction + increase + 1e-6);
            }
        }
    }

    #[test]
    fn test_combination_requires_equal_cycles() {
        let series = series();
        let calculator =
            Calculator::builder().series(&series).metrics(Metric::Co2.into()).combination(true).build();
        let measure = Measure::builder()
            .id("A")
            .reduction(parameters(2.0, 10))
            .increase(parameters(3.0, 10))
            .combinable(true)
            .build();
        let records = calculator.calculate(&measure).unwrap();
        assert!(records.iter().all(|record| record.load_change != LoadChange::Combination));
    }

    #[test]
    fn test_cases_of_one_device() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(Metric::Co2.into()).build();
        let variant = |maximization| Variant {
            scope: Some(Scope::Potential),
            maximization: Some(maximization),
        };
        let measures = [
            Measure::builder()
                .id("A")
                .variant(variant(Maximization::Power))
                .reduction(parameters(1.0, 10))
                .build(),
            Measure::builder()
                .id("A")
                .variant(variant(Maximization::RetrievalDuration))
                .reduction(parameters(2.0, 10))
                .build(),
        ];
        let report = calculator.run(&measures);
        assert_eq!(
            report.records.iter().map(|record| record.variant).collect_vec(),
            [variant(Maximization::Power), variant(Maximization::RetrievalDuration)],
        );
        // Twice the energy per activation at the same evening excess:
        assert_abs_diff_eq!(
            report.records[1].savings.emission.0,
            2.0 * report.records[0].savings.emission.0,
            epsilon = 1e-6,
        );
    }

    #[test]
    fn test_skipped() {
        let series = series();
        let calculator = Calculator::builder().series(&series).metrics(Metric::Co2.into()).build();
        let measures = [
            measure("A", 10),
            Measure::builder().id("B").reduction(parameters(0.0, 10)).build(),
            Measure::builder().id("C").build(),
            measure("D", -1),
        ];
        let report = calculator.run(&measures);
        assert_eq!(
            report.records.iter().map(|record| record.measure.as_str()).dedup().collect_vec(),
            ["A"],
        );
        assert_eq!(
            report.skipped.iter().map(|skipped| &skipped.error).collect_vec(),
            [
                &MeasureError::NonPositiveDuration {
                    direction: Direction::Reduction,
                    duration: Hours(0.0),
                },
                &MeasureError::NoDirection,
                &MeasureError::NegativeFrequency { direction: Direction::Reduction, frequency: -1 },
            ],
        );
    }
}
