quantity!(
    /// Wholesale electricity price in euro per megawatt-hour.
    MegawattHourPrice, suffix: "€/MWh", precision: 2
);
