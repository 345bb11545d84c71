pub mod dialect;
pub mod fetcher;

pub use dialect::Dialect;
pub use fetcher::RowFetcher;
