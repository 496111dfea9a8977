use std::ops::Div;

use crate::quantity::{
    cost::Euros,
    emission::{EmissionFactor, Kilograms},
    power::Kilowatts,
    price::MegawattHourPrice,
    time::Hours,
};

quantity!(KilowattHours, suffix: "kWh", precision: 3);

// Grams per kilowatt-hour times kilowatt-hours gives grams:
implement_mul!(KilowattHours, EmissionFactor, Kilograms, scale: 0.001);

// Euro per megawatt-hour times kilowatt-hours:
implement_mul!(KilowattHours, MegawattHourPrice, Euros, scale: 0.001);

impl Div<Hours> for KilowattHours {
    type Output = Kilowatts;

    fn div(self, hours: Hours) -> Self::Output {
        assert!(hours.0.is_normal());
        Kilowatts(self.0 / hours.0)
    }
}
