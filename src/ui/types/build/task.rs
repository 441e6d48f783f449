use crate::evaluation::TraceFormat;
use crate::tasks::SequentialUpdateTask;
use crate::ui::types::build::{BuildError, build_feed};
use crate::ui::types::choices::TaskChoice;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::str::FromStr;

/// A ready-to-run task plus where its trace goes afterwards.
pub struct SequentialUpdatePlan {
    pub task: SequentialUpdateTask,
    pub export_path: PathBuf,
    pub export_format: TraceFormat,
}

/// `posterior-trace-YYYYmmdd-HHMMSS.<ext>` in the working directory.
pub fn default_export_path(format: TraceFormat, at: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "posterior-trace-{}.{}",
        at.format("%Y%m%d-%H%M%S"),
        format.extension()
    ))
}

pub fn build_task(choice: TaskChoice) -> Result<SequentialUpdatePlan, BuildError> {
    match choice {
        TaskChoice::SequentialUpdate(p) => {
            let export_format = TraceFormat::from_str(p.export_format.trim()).map_err(|_| {
                BuildError::InvalidParameter(format!(
                    "unknown export format '{}' (expected csv, tsv or json)",
                    p.export_format
                ))
            })?;

            let export_path = match p.export_path.trim() {
                "" => default_export_path(export_format, Local::now()),
                given => PathBuf::from(given),
            };

            let feed = build_feed(p.feed)?;
            let task = SequentialUpdateTask::new(feed, p.max_chunks)?;

            Ok(SequentialUpdatePlan {
                task,
                export_path,
                export_format,
            })
        }
    }
}
