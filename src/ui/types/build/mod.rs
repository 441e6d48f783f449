mod error;
mod feeds;
mod task;

pub use error::BuildError;

pub use feeds::build_feed;
pub use task::{SequentialUpdatePlan, build_task, default_export_path};
