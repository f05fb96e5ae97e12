use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// Maximum number of replays after the initial attempt.
pub const MAX_RETRIES: u32 = 5;

/// First backoff delay; doubles on each subsequent retry (4s, 8s, 16s, 32s, 64s).
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(4000);

/// Run an operation, replaying it on rate-limit errors with capped
/// exponential backoff. Any other error propagates immediately; exhausting
/// the retries propagates the last rate-limit error.
pub async fn retry_with_backoff<T, F, Fut>(operation_name: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_rate_limit() && attempt < MAX_RETRIES => {
                attempt += 1;
                log::warn!(
                    "⚠️  Rate limit hit on {}. Retrying in {}ms... (retry {} of {})",
                    operation_name,
                    delay.as_millis(),
                    attempt,
                    MAX_RETRIES
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(error) => return Err(error),
        }
    }
}
