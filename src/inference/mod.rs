mod posterior_belief;
mod sequential_posterior_updater;

pub use posterior_belief::PosteriorBelief;
pub use sequential_posterior_updater::{SequentialPosteriorUpdater, UpdaterState, conjugate_update};
