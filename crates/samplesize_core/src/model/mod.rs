mod confidence;
mod inputs;
mod results;

pub use confidence::ConfidenceLevel;
pub use inputs::{EstimateInputs, MarginOfError, PopulationSize, Proportion};
pub use results::SampleSizeResult;
