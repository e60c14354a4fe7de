pub mod delimited;

pub use delimited::{DelimitedDataset, SOURCE_DELIMITER, STORED_DELIMITER};
