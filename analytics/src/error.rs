use benchlog_log::LogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("unsupported confidence level: {0}")]
    UnsupportedConfidence(f64),
    #[error("percentile must be in (0, 1], got {0}")]
    InvalidPercentile(f64),
    #[error(transparent)]
    Log(#[from] LogError),
}
