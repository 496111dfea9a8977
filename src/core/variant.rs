use std::fmt::{Display, Formatter};

/// Whether the parameters describe the measure as it is today or as it could be.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Potential,
    Perspective,
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Potential => write!(f, "potential"),
            Self::Perspective => write!(f, "perspective"),
        }
    }
}

/// Which parameter the measure was pushed to the maximum for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Maximization {
    Power,

    #[serde(alias = "retrieval duration")]
    RetrievalDuration,
}

impl Display for Maximization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Power => write!(f, "power"),
            Self::RetrievalDuration => write!(f, "retrieval duration"),
        }
    }
}

/// Case of a measure: the same device may be described several times, once per scope
/// and maximization, and every case is calculated on its own.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Variant {
    pub scope: Option<Scope>,
    pub maximization: Option<Maximization>,
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.scope, self.maximization) {
            (Some(scope), Some(maximization)) => write!(f, "{scope}, max. {maximization}"),
            (Some(scope), None) => write!(f, "{scope}"),
            (None, Some(maximization)) => write!(f, "max. {maximization}"),
            (None, None) => Ok(()),
        }
    }
}
