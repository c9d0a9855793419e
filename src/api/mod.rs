pub mod gemini_api;
pub mod weather_api;

use crate::error::NovaError;
use std::time::Duration;
use url::Url;

/// Shared reqwest client for every upstream call.
pub fn build_http_client(proxy: Option<&Url>) -> Result<reqwest::Client, NovaError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("nova-assistant/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(30));
    if let Some(proxy_url) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}
