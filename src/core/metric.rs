use std::fmt::{Display, Formatter};

/// Quantity the retrieval schedule is optimized for.
#[derive(Debug, Hash, serde::Serialize, enumset::EnumSetType)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Co2,
    Cost,
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Co2 => write!(f, "CO₂"),
            Self::Cost => write!(f, "cost"),
        }
    }
}
