mod estimators;
mod preview;

pub use estimators::{Estimator, TrueMeanTracker};
pub use preview::{PosteriorRecord, PosteriorTrace, TraceFormat};
