mod estimator;
mod true_mean_tracker;

pub use estimator::Estimator;
pub use true_mean_tracker::TrueMeanTracker;
