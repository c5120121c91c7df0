//! Small filesystem helpers shared by the generator.
pub mod fs;

pub use fs::{create_dir_all, write_atomic};
