mod feature_track;
mod sequential_update_task;
mod update_error;

pub use feature_track::{FeatureTrack, likelihood_variance_or_prior};
pub use sequential_update_task::SequentialUpdateTask;
pub use update_error::UpdateError;
