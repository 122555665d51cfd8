//! Stored positions, the session over them, and portfolio metrics

mod clock;
mod records;
mod store;
mod summary;

pub use clock::{Clock, FixedClock, SystemClock};
pub use records::{InvestmentRecord, WithdrawalRecord};
pub use store::{InMemoryRecordStore, PortfolioSession, PortfolioSnapshot, RecordStore};
pub use summary::{
    distribution, movements, upcoming_maturities, CategoryShare, Movement, MovementFilter, MovementKind,
    PortfolioSummary, UpcomingMaturity, UPCOMING_WINDOW_DAYS,
};
