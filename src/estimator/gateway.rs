//! Remote-first estimation with a guaranteed local fallback

use log::{info, warn};
use std::sync::Arc;

use super::client::{GenAiClient, RemoteEstimator};
use super::prompt::build_prompt;
use super::response::parse_estimate;
use super::EstimatorError;
use crate::config::EngineConfig;
use crate::instrument::ValidatedQuote;
use crate::valuation::{MaturityEstimate, ValuationEngine};

/// Estimation entry point
///
/// `estimate` cannot fail: a validated quote always yields an estimate, and
/// `MaturityEstimate::provenance` records whether the remote service answered.
pub struct EstimatorGateway {
    remote: Option<Arc<dyn RemoteEstimator>>,
    engine: ValuationEngine,
}

impl EstimatorGateway {
    pub fn new(engine: ValuationEngine, remote: Option<Arc<dyn RemoteEstimator>>) -> Self {
        Self { remote, engine }
    }

    /// Gateway that never calls out
    pub fn local_only(engine: ValuationEngine) -> Self {
        Self::new(engine, None)
    }

    /// Build from configuration; a disabled estimator or missing key means local only
    pub fn from_config(config: EngineConfig) -> Self {
        let remote: Option<Arc<dyn RemoteEstimator>> = if !config.estimator.enabled {
            None
        } else {
            match GenAiClient::from_settings(&config.estimator) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("Remote estimator unavailable, local calculations only: {}", e);
                    None
                }
            }
        };
        Self::new(ValuationEngine::new(config), remote)
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Try the remote estimator once, otherwise value locally
    pub async fn estimate(&self, quote: &ValidatedQuote) -> MaturityEstimate {
        if let Some(remote) = &self.remote {
            match self.try_remote(remote.as_ref(), quote).await {
                Ok(estimate) => {
                    info!("Estimate for {} from remote estimator", quote.ticker());
                    return estimate;
                }
                Err(e) => warn!("Remote estimator failed for {}, using local engine: {}", quote.ticker(), e),
            }
        }

        let estimate = self.engine.estimate(quote);
        info!("Estimate for {} from local engine", quote.ticker());
        estimate
    }

    async fn try_remote(&self, remote: &dyn RemoteEstimator, quote: &ValidatedQuote) -> Result<MaturityEstimate, EstimatorError> {
        let prompt = build_prompt(quote);
        let text = remote.complete(&prompt).await?;
        parse_estimate(&text)
    }
}
