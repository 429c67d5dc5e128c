use crate::error::EngineError;
use async_trait::async_trait;
use core_types::Account;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The persistence seam for account state.
///
/// The engine is pure logic over an in-memory `Account` value; whatever sits
/// behind this trait (a process-local map, a database) is invisible to it.
/// `save` must replace the stored account as a single unit so that readers
/// never observe a partially-applied trade.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads a copy of the account, or `None` if the id is unknown.
    async fn load(&self, account_id: Uuid) -> Result<Option<Account>, EngineError>;

    /// Stores the account, replacing any previous state atomically.
    async fn save(&self, account: &Account) -> Result<(), EngineError>;
}

/// A process-local account store backed by a hash map.
///
/// This is the store the demo mode and the test suites run on. Whole
/// `Account` values are swapped in and out under the map lock, which gives
/// readers the committed-state guarantee for free.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn load(&self, account_id: Uuid) -> Result<Option<Account>, EngineError> {
        Ok(self.accounts.read().await.get(&account_id).cloned())
    }

    async fn save(&self, account: &Account) -> Result<(), EngineError> {
        self.accounts
            .write()
            .await
            .insert(account.account_id, account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ZodiacSign;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryAccountStore::new();
        let account = Account::new(ZodiacSign::Aries, dec!(1000));

        store.save(&account).await.unwrap();
        let loaded = store.load(account.account_id).await.unwrap().unwrap();
        assert_eq!(loaded, account);
    }

    #[tokio::test]
    async fn test_unknown_id_loads_none() {
        let store = MemoryAccountStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_state() {
        let store = MemoryAccountStore::new();
        let mut account = Account::new(ZodiacSign::Aries, dec!(1000));
        store.save(&account).await.unwrap();

        account.cash_balance = dec!(750);
        store.save(&account).await.unwrap();

        let loaded = store.load(account.account_id).await.unwrap().unwrap();
        assert_eq!(loaded.cash_balance, dec!(750));
    }
}
