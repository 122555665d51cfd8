//! Optional remote estimator with validation and local fallback

mod client;
mod error;
mod gateway;
mod prompt;
mod response;

pub use client::{GenAiClient, RemoteEstimator};
pub use error::EstimatorError;
pub use gateway::EstimatorGateway;
pub use prompt::build_prompt;
pub use response::{parse_estimate, strip_code_fence};
