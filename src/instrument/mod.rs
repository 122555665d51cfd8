//! Instrument descriptions, quote requests and ticker decoding

mod category;
mod request;
mod ticker;
pub mod loader;

pub use category::InstrumentCategory;
pub use request::{InstrumentQuoteRequest, ValidatedQuote};
pub use ticker::{resolve_ticker_maturity, TICKER_BASE_YEAR};
pub use loader::{load_requests, load_requests_from_reader};
