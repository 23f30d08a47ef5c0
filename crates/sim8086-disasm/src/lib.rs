pub mod model;

// Re-export for integration tests and other front ends
pub use model::{default_out_path, load_raw_bin, records, Record};
