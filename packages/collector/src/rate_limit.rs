use chrono::Local;
use reposnap_api_source::ApiSource;

/// Remaining request quota. Any failure counts as no quota left.
pub async fn check_rate_limit(source: &dyn ApiSource) -> u64 {
    match source.rate_limit().await {
        Ok(status) => {
            log::info!(
                "Rate limit: {} remaining out of {}",
                status.remaining,
                status.limit
            );
            log::info!(
                "Reset time: {}",
                status
                    .reset_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            );
            status.remaining
        }
        Err(e) => {
            log::warn!("Rate limit check against {} failed: {e}", source.source_name());
            0
        }
    }
}
