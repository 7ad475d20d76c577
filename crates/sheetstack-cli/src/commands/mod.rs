//! Command implementations.

mod compose;

pub use compose::{run, Mode};
