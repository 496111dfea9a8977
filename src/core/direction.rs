use std::fmt::{Display, Formatter};

use comfy_table::Color;

/// Direction of the load change during a retrieval.
#[derive(Debug, Hash, serde::Deserialize, serde::Serialize, enumset::EnumSetType)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Consumption is shifted out of the activation window and made up for at the yearly average.
    #[serde(alias = "load reduction")]
    Reduction,

    /// Consumption is pulled into the activation window from the yearly average.
    #[serde(alias = "load increase")]
    Increase,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reduction => write!(f, "reduction"),
            Self::Increase => write!(f, "increase"),
        }
    }
}

impl Direction {
    /// Sign of the savings relative to the excess of a slot over the yearly average.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Reduction => 1.0,
            Self::Increase => -1.0,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Reduction => Color::Blue,
            Self::Increase => Color::Magenta,
        }
    }
}
