quantity!(
    /// Specific emission factor of the electricity mix in grams of CO₂-equivalent per kilowatt-hour.
    EmissionFactor, suffix: "g/kWh", precision: 1
);

quantity!(
    /// Kilograms of CO₂-equivalent.
    Kilograms, suffix: "kg CO₂e", precision: 3
);
