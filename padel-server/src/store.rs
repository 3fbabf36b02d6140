use std::future::Future;
use std::time::Duration;

use padel_persistence::{StoreError, StoreResult};
use padel_types::PadelError;
use tracing::warn;

/// Run one store call under a deadline.
///
/// Expiry drops the call, which rolls back any transaction it had open,
/// and is reported as the retryable `Timeout`.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, PadelError>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(store_error),
        Err(_) => {
            warn!("Store call '{}' exceeded {:?}", operation, limit);
            Err(PadelError::Timeout {
                operation: operation.to_string(),
            })
        }
    }
}

pub(crate) fn store_error(err: StoreError) -> PadelError {
    match err {
        StoreError::Db(err) => PadelError::StoreUnavailable {
            message: err.to_string(),
        },
        StoreError::Corrupt(message) => PadelError::CorruptRecord { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let result = bounded(
            Duration::from_millis(10),
            "list_matches",
            std::future::pending::<StoreResult<()>>(),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(
            err,
            PadelError::Timeout {
                operation: "list_matches".to_string()
            }
        );
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_errors_are_classified() {
        let unavailable = bounded(Duration::from_secs(1), "op", async {
            Err::<(), _>(StoreError::Db(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection refused".to_string(),
            ))))
        })
        .await
        .unwrap_err();
        assert!(matches!(unavailable, PadelError::StoreUnavailable { .. }));
        assert!(unavailable.is_retryable());

        let corrupt = bounded(Duration::from_secs(1), "op", async {
            Err::<(), _>(StoreError::Corrupt("bad status".to_string()))
        })
        .await
        .unwrap_err();
        assert_eq!(
            corrupt,
            PadelError::CorruptRecord {
                message: "bad status".to_string()
            }
        );
        assert!(!corrupt.is_retryable());
    }
}
