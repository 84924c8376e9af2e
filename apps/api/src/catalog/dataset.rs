//! Baseline dataset — the static job document used to seed an empty store.

use std::time::Duration;

use tracing::info;

use crate::errors::AppError;
use crate::models::job::Job;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Loads the baseline job array from an `http(s)://` URL or a local file path.
pub async fn load_baseline(source: &str) -> Result<Vec<Job>, AppError> {
    let body = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(source).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| AppError::DatasetLoadFailed(format!("reading {source}: {e}")))?
    };

    let jobs = parse_dataset(&body)?;
    info!("Loaded {} baseline jobs from {source}", jobs.len());
    Ok(jobs)
}

pub fn parse_dataset(body: &str) -> Result<Vec<Job>, AppError> {
    serde_json::from_str(body)
        .map_err(|e| AppError::DatasetLoadFailed(format!("malformed dataset: {e}")))
}

async fn fetch_remote(url: &str) -> Result<String, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::DatasetLoadFailed(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::DatasetLoadFailed(format!("fetching {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::DatasetLoadFailed(format!("HTTP Error: {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::DatasetLoadFailed(format!("reading body of {url}: {e}")))
}
