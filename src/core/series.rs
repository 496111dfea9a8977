use chrono::{Datelike, NaiveDate};

use crate::{
    core::error::DataShapeError,
    quantity::{emission::EmissionFactor, price::MegawattHourPrice, time::Hours},
};

/// Length of one slot of the time series.
pub const SLOT_DURATION: Hours = Hours(0.25);

pub const SLOTS_PER_DAY: usize = 96;

/// Number of quarter-hours in the calendar year.
#[must_use]
pub fn slots_in_year(year: i32) -> usize {
    let n_days = NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |last_day| last_day.ordinal());
    n_days as usize * SLOTS_PER_DAY
}

/// Specific emission factor and price of electricity, either of one slot or averaged over the year.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, derive_more::Add, derive_more::Sub)]
pub struct Signal {
    pub emission_factor: EmissionFactor,
    pub price: MegawattHourPrice,
}

/// Quarter-hourly signals of the target year together with their yearly averages.
#[must_use]
pub struct YearSeries {
    year: i32,
    slots: Vec<Signal>,

    /// Reference the shifted consumption is made up for at.
    averages: Signal,
}

impl YearSeries {
    pub fn try_new(year: i32, slots: Vec<Signal>, averages: Signal) -> Result<Self, DataShapeError> {
        let expected = slots_in_year(year);
        if slots.len() == expected {
            Ok(Self { year, slots, averages })
        } else {
            Err(DataShapeError { year, expected, actual: slots.len() })
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn slots(&self) -> &[Signal] {
        &self.slots
    }

    pub const fn averages(&self) -> Signal {
        self.averages
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }
}
