use std::{path::PathBuf, sync::Arc};

use models::{Account, AccountInput, Payment, PaymentInput, ReportEntry};
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::ServiceError;
use crate::ids::IdAllocator;
use crate::report::build_report;
use crate::storage::{FlatFileTable, TableStorage};

/// In-memory mirror of both tables plus their id counters.
struct Tables {
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    account_ids: IdAllocator,
    payment_ids: IdAllocator,
}

/// Accounts and payments held in memory and persisted to their tables.
///
/// Every mutation writes the table first and only then touches memory, all
/// under the write lock, so a failed write leaves the store as it was.
pub struct LedgerStore {
    state: RwLock<Tables>,
    accounts_table: Arc<dyn TableStorage<Account>>,
    payments_table: Arc<dyn TableStorage<Payment>>,
}

impl LedgerStore {
    /// Open both flat files (creating them if missing) and load them.
    pub async fn open<A, P>(accounts_path: A, payments_path: P) -> Result<Arc<Self>, ServiceError>
    where
        A: Into<PathBuf>,
        P: Into<PathBuf>,
    {
        let accounts = FlatFileTable::<Account>::open(accounts_path).await?;
        let payments = FlatFileTable::<Payment>::open(payments_path).await?;
        Self::with_storage(Arc::new(accounts), Arc::new(payments)).await
    }

    /// Load the store from arbitrary table implementations.
    pub async fn with_storage(
        accounts_table: Arc<dyn TableStorage<Account>>,
        payments_table: Arc<dyn TableStorage<Payment>>,
    ) -> Result<Arc<Self>, ServiceError> {
        let accounts = accounts_table.read_all().await?;
        let payments = payments_table.read_all().await?;
        let account_ids = IdAllocator::seeded(accounts.iter().map(|a| a.id))?;
        let payment_ids = IdAllocator::seeded(payments.iter().map(|p| p.id))?;
        info!(
            event = "ledger_loaded",
            accounts = accounts.len(),
            payments = payments.len(),
            next_account_id = account_ids.peek(),
            next_payment_id = payment_ids.peek(),
            "ledger loaded from storage"
        );
        let state = Tables { accounts, payments, account_ids, payment_ids };
        Ok(Arc::new(Self { state: RwLock::new(state), accounts_table, payments_table }))
    }

    pub async fn create_account(&self, input: AccountInput) -> Result<Account, ServiceError> {
        input.validate()?;
        let mut state = self.state.write().await;
        // advance a copy; the counter only moves once the line is on disk
        let mut ids = state.account_ids;
        let account = input.into_account(ids.allocate()?);
        self.accounts_table.append(&account).await?;
        state.account_ids = ids;
        state.accounts.push(account.clone());
        info!(event = "account_created", account_id = account.id, "account created");
        Ok(account)
    }

    pub async fn list_accounts(&self) -> Vec<Account> {
        self.state.read().await.accounts.clone()
    }

    pub async fn get_account(&self, id: i64) -> Option<Account> {
        let state = self.state.read().await;
        state.accounts.iter().find(|a| a.id == id).cloned()
    }

    /// Remove an account and rewrite its table; returns whether it existed.
    /// Payments pointing at the account are left alone.
    pub async fn delete_account(&self, id: i64) -> Result<bool, ServiceError> {
        let mut state = self.state.write().await;
        if !state.accounts.iter().any(|a| a.id == id) {
            return Ok(false);
        }
        let survivors: Vec<Account> = state.accounts.iter().filter(|a| a.id != id).cloned().collect();
        self.accounts_table.rewrite(&survivors).await?;
        state.accounts = survivors;
        info!(event = "account_deleted", account_id = id, "account deleted");
        Ok(true)
    }

    pub async fn create_payment(&self, input: PaymentInput) -> Result<Payment, ServiceError> {
        let mut state = self.state.write().await;
        let mut ids = state.payment_ids;
        let payment = input.into_payment(ids.allocate()?);
        self.payments_table.append(&payment).await?;
        state.payment_ids = ids;
        state.payments.push(payment.clone());
        info!(
            event = "payment_created",
            payment_id = payment.id,
            from_account_id = payment.from_account_id,
            to_account_id = payment.to_account_id,
            "payment created"
        );
        Ok(payment)
    }

    pub async fn list_payments(&self) -> Vec<Payment> {
        self.state.read().await.payments.clone()
    }

    pub async fn get_payment(&self, id: i64) -> Option<Payment> {
        let state = self.state.read().await;
        state.payments.iter().find(|p| p.id == id).cloned()
    }

    /// Every payment with account ids resolved against the current accounts.
    pub async fn report(&self) -> Vec<ReportEntry> {
        let state = self.state.read().await;
        build_report(&state.accounts, &state.payments)
    }

    pub async fn next_account_id(&self) -> i64 {
        self.state.read().await.account_ids.peek()
    }

    pub async fn next_payment_id(&self) -> i64 {
        self.state.read().await.payment_ids.peek()
    }
}
