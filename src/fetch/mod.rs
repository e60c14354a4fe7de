pub mod sheet_fetcher;

pub use sheet_fetcher::{FetchedSheet, SheetFetcher};
