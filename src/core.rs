pub mod block;
pub mod calculator;
pub mod combiner;
pub mod direction;
pub mod error;
pub mod measure;
pub mod metric;
pub mod report;
pub mod savings;
pub mod scorer;
pub mod selection;
pub mod series;
pub mod variant;
