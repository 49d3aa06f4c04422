use futures::future::try_join_all;
use gloo_net::http::Request;
use log::{error, info};
use std::future::Future;
use thiserror::Error;

use crate::config::AppConfig;
use crate::session::Item;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} while fetching {url}")]
    Status { status: u16, url: String },
}

impl FetchError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }
}

/// Runs `fetch_one` for ids `0..count` concurrently and keeps id order.
///
/// The first failure fails the whole batch.
pub async fn fetch_batch_with<F, Fut>(count: usize, fetch_one: F) -> Result<Vec<Item>, FetchError>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    let requests = (0..count as u32).map(|id| {
        let request = fetch_one(id);
        async move { request.await.map(|url| Item::new(id, url)) }
    });
    try_join_all(requests).await
}

pub async fn fetch_cat_batch(config: &AppConfig) -> Result<Vec<Item>, FetchError> {
    let result = fetch_batch_with(config.count, |id| resolve_image(config.image_url(id))).await;
    match &result {
        Ok(items) => info!("Fetched {} cats from {}", items.len(), config.source_url),
        Err(err) => error!("Error fetching cats: {}", err),
    }
    result
}

async fn resolve_image(url: String) -> Result<String, FetchError> {
    let response = Request::get(&url)
        .send()
        .await
        .map_err(FetchError::network)?;

    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
            url,
        });
    }

    // Redirects are followed, so this is where the image actually lives.
    let location = response.url();
    if location.is_empty() {
        Ok(url)
    } else {
        Ok(location)
    }
}
