//! Request construction helpers

mod builder;

pub use builder::EstimateBuilder;
