pub mod run;

pub use run::{execute, list, RunOptions};
