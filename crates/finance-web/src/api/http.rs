//! HTTP fetch for the browser, via gloo-net

use gloo_net::http::Request;

/// Why the dataset could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("invalid dataset: {0}")]
    Data(#[from] finance_core::DataError),
}

/// GET a URL and return the body of a successful response
pub async fn get_text(url: &str) -> Result<String, FetchError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text().await?)
}
