mod cancellation;
mod independence;

pub use cancellation::{Cancellable, CancellationToken};
pub use independence::{IndependenceResult, IndependenceTest};
