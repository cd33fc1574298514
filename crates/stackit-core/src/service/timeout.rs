//! Bounded store calls.

use std::future::Future;
use std::time::Duration;

use stackit_types::error::RepositoryError;

/// Run a repository call, failing with `RepositoryError::Timeout` if it takes
/// longer than `limit`. No retry is attempted.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            let ms = limit.as_millis() as u64;
            tracing::warn!(timeout_ms = ms, "store call timed out");
            Err(RepositoryError::Timeout(ms))
        }
    }
}
