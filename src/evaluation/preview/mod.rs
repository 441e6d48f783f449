mod posterior_record;
mod posterior_trace;

pub use posterior_record::PosteriorRecord;
pub use posterior_trace::{PosteriorTrace, TraceFormat};
