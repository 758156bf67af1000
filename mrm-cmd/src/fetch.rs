//! `fetch`: download a dataset JSON document, validate it, save it.

use crate::input;
use anyhow::Context;
use log::info;
use std::time::Duration;

pub async fn fetch_document(client: &reqwest::Client, url: &str) -> anyhow::Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {}", url))?;
    if !response.status().is_success() {
        anyhow::bail!("{} returned {}", url, response.status());
    }
    Ok(response.text().await?)
}

pub async fn run_fetch(url: &str, output: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    info!("Fetching dataset from {}", url);
    let body = fetch_document(&client, url).await?;

    // Refuse to save anything the map could not load.
    let loaded = input::from_text(&body, None, url.to_string())?;
    for warning in loaded.dataset.quality_warnings() {
        log::warn!("{}", warning);
    }

    tokio::fs::write(output, &body)
        .await
        .with_context(|| format!("writing {}", output))?;
    info!(
        "Saved {} basins and {} projects to {}",
        loaded.dataset.basins().len(),
        loaded.dataset.projects().len(),
        output
    );
    Ok(())
}
