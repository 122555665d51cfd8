//! ValorAr - yield and maturity engine for Argentine retail fixed-income positions
//!
//! This library provides:
//! - Ticker maturity decoding for Lecaps and bonds
//! - Rate conversions between total return, TEM, TNA, TAE and TIR
//! - A deterministic maturity valuation engine per instrument category
//! - A remote estimator gateway that always falls back to the local engine
//! - A day-stepped compound projection simulator with periodic contributions
//! - Portfolio records, session context and dashboard metrics

pub mod config;
pub mod error;
pub mod instrument;
pub mod rates;
pub mod valuation;
pub mod estimator;
pub mod projection;
pub mod scenario;
pub mod portfolio;

// Re-export commonly used types
pub use config::{EngineConfig, NoteFallback};
pub use error::{EngineError, Result};
pub use instrument::{InstrumentCategory, InstrumentQuoteRequest, ValidatedQuote};
pub use valuation::{MaturityDate, MaturityEstimate, Provenance, RateFigure, ValuationEngine};
pub use estimator::EstimatorGateway;
pub use projection::{ProjectionEngine, ProjectionInput, ProjectionResult};
pub use scenario::ScenarioRunner;
pub use portfolio::{InvestmentRecord, PortfolioSession, PortfolioSummary, WithdrawalRecord};
