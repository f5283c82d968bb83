pub mod fs;

pub use fs::{read_source, write_source};
