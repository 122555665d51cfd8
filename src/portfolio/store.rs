//! Record persistence collaborator and the per-user session over it

use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use super::clock::Clock;
use super::records::{InvestmentRecord, WithdrawalRecord};
use super::summary::{movements, Movement, MovementFilter, PortfolioSummary};
use crate::error::{EngineError, Result};

/// Everything stored for one user at a point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSnapshot {
    pub investments: Vec<InvestmentRecord>,
    pub withdrawals: Vec<WithdrawalRecord>,
}

/// Contract for the store that persists a user's records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new investment; returns it with its assigned id
    async fn save_investment(&self, user_id: &str, record: InvestmentRecord) -> Result<InvestmentRecord>;
    async fn delete_investment(&self, user_id: &str, id: &str) -> Result<()>;
    async fn save_withdrawal(&self, user_id: &str, record: WithdrawalRecord) -> Result<WithdrawalRecord>;
    async fn delete_withdrawal(&self, user_id: &str, id: &str) -> Result<()>;
    /// Live view of the user's records; updated after every change
    fn subscribe(&self, user_id: &str) -> Result<watch::Receiver<PortfolioSnapshot>>;
}

/// Process-local store keyed by user id
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    users: Mutex<HashMap<String, watch::Sender<PortfolioSnapshot>>>,
    next_id: AtomicU64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> String {
        format!("rec-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Apply `change` to the user's snapshot and notify subscribers
    fn modify<T>(&self, user_id: &str, change: impl FnOnce(&mut PortfolioSnapshot) -> Result<T>) -> Result<T> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| EngineError::Store("record store lock poisoned".to_string()))?;
        let sender = users
            .entry(user_id.to_string())
            .or_insert_with(|| watch::channel(PortfolioSnapshot::default()).0);

        let mut outcome = None;
        sender.send_if_modified(|snapshot| {
            let result = change(snapshot);
            let modified = result.is_ok();
            outcome = Some(result);
            modified
        });

        outcome.unwrap_or_else(|| Err(EngineError::Store("update was not applied".to_string())))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save_investment(&self, user_id: &str, mut record: InvestmentRecord) -> Result<InvestmentRecord> {
        record.id = self.next_id();
        self.modify(user_id, |snapshot| {
            snapshot.investments.push(record.clone());
            Ok(record)
        })
    }

    async fn delete_investment(&self, user_id: &str, id: &str) -> Result<()> {
        self.modify(user_id, |snapshot| {
            let before = snapshot.investments.len();
            snapshot.investments.retain(|r| r.id != id);
            if snapshot.investments.len() == before {
                return Err(EngineError::Store(format!("investment {} not found", id)));
            }
            Ok(())
        })
    }

    async fn save_withdrawal(&self, user_id: &str, mut record: WithdrawalRecord) -> Result<WithdrawalRecord> {
        record.id = self.next_id();
        self.modify(user_id, |snapshot| {
            snapshot.withdrawals.push(record.clone());
            Ok(record)
        })
    }

    async fn delete_withdrawal(&self, user_id: &str, id: &str) -> Result<()> {
        self.modify(user_id, |snapshot| {
            let before = snapshot.withdrawals.len();
            snapshot.withdrawals.retain(|r| r.id != id);
            if snapshot.withdrawals.len() == before {
                return Err(EngineError::Store(format!("withdrawal {} not found", id)));
            }
            Ok(())
        })
    }

    fn subscribe(&self, user_id: &str) -> Result<watch::Receiver<PortfolioSnapshot>> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| EngineError::Store("record store lock poisoned".to_string()))?;
        let sender = users
            .entry(user_id.to_string())
            .or_insert_with(|| watch::channel(PortfolioSnapshot::default()).0);
        Ok(sender.subscribe())
    }
}

/// Records of one signed-in user
///
/// Owns the store subscription for the lifetime of the sign-in. After
/// `close` every operation fails with `SessionClosed`.
pub struct PortfolioSession {
    user_id: String,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    updates: Option<watch::Receiver<PortfolioSnapshot>>,
}

impl PortfolioSession {
    pub fn open(store: Arc<dyn RecordStore>, user_id: impl Into<String>, clock: Arc<dyn Clock>) -> Result<Self> {
        let user_id = user_id.into();
        let updates = store.subscribe(&user_id)?;
        info!("Portfolio session opened for {}", user_id);
        Ok(Self {
            user_id,
            store,
            clock,
            updates: Some(updates),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_open(&self) -> bool {
        self.updates.is_some()
    }

    /// Latest records seen on the subscription
    pub fn snapshot(&self) -> Result<PortfolioSnapshot> {
        let updates = self.updates.as_ref().ok_or(EngineError::SessionClosed)?;
        let snapshot = updates.borrow().clone();
        Ok(snapshot)
    }

    /// Dashboard figures as of the session clock's today
    pub fn summary(&self) -> Result<PortfolioSummary> {
        let snapshot = self.snapshot()?;
        Ok(PortfolioSummary::compute(&snapshot.investments, &snapshot.withdrawals, self.clock.today()))
    }

    pub fn movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
        let snapshot = self.snapshot()?;
        Ok(movements(&snapshot.investments, &snapshot.withdrawals, filter))
    }

    /// Wait until the store publishes a change
    pub async fn changed(&mut self) -> Result<()> {
        let updates = self.updates.as_mut().ok_or(EngineError::SessionClosed)?;
        updates
            .changed()
            .await
            .map_err(|_| EngineError::Store("record store dropped".to_string()))
    }

    pub async fn add_investment(&self, record: InvestmentRecord) -> Result<InvestmentRecord> {
        self.ensure_open()?;
        let saved = self.store.save_investment(&self.user_id, record).await?;
        debug!("Saved investment {} for {}", saved.id, self.user_id);
        Ok(saved)
    }

    pub async fn remove_investment(&self, id: &str) -> Result<()> {
        self.ensure_open()?;
        self.store.delete_investment(&self.user_id, id).await
    }

    pub async fn add_withdrawal(&self, record: WithdrawalRecord) -> Result<WithdrawalRecord> {
        self.ensure_open()?;
        let saved = self.store.save_withdrawal(&self.user_id, record).await?;
        debug!("Saved withdrawal {} for {}", saved.id, self.user_id);
        Ok(saved)
    }

    pub async fn remove_withdrawal(&self, id: &str) -> Result<()> {
        self.ensure_open()?;
        self.store.delete_withdrawal(&self.user_id, id).await
    }

    /// Drop the subscription (sign-out)
    pub fn close(&mut self) {
        if self.updates.take().is_some() {
            info!("Portfolio session closed for {}", self.user_id);
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(EngineError::SessionClosed)
        }
    }
}
