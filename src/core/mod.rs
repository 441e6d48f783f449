pub mod chunks;
pub mod errors;
pub mod estimators;
pub mod feature;

pub use errors::ContractViolation;
pub use feature::FeatureId;
