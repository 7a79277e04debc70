pub mod dataset;
pub mod memory;
