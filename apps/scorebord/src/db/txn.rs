use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use tracing::warn;

use crate::state::app_state::AppState;

/// Execute a function within a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err`. The closure
/// receives the transaction and returns a boxed future borrowing it, so
/// callers write `with_txn(&state, |txn| Box::pin(async move { ... }))`.
pub async fn with_txn<R, E, F>(state: &AppState, f: F) -> Result<R, E>
where
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
    E: From<DbErr>,
{
    let txn = state.db().begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
