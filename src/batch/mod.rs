//! C4: the parallel batch pipeline (`spec.md` §4.4).

mod pipeline;

pub use pipeline::{run, CancelToken};
