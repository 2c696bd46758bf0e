use reqwest::Url;
use std::time::Duration;

use super::listing::parse_listing;
use crate::domain::model::Track;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct ListingClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ListingClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5500".to_owned(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// 目录列表客户端：只发 `GET <base>/<folder>/`
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: reqwest::Client,
    base_url: String,
}

impl ListingClient {
    pub fn new(cfg: &ListingClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent("dirplay")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `folder` 需已规范化（无首尾 `/`）
    pub fn listing_url(&self, folder: &str) -> Result<Url, FetchError> {
        let raw = format!("{}/{}/", self.base_url, folder);
        Url::parse(&raw).map_err(|e| FetchError::BadUrl(format!("{raw}: {e}")))
    }

    pub async fn fetch_listing(&self, folder: &str) -> Result<Vec<Track>, FetchError> {
        let url = self.listing_url(folder)?;
        tracing::debug!(url = %url, "请求目录列表");

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.text().await?;
        let tracks = parse_listing(&body, &url);
        tracing::debug!(url = %url, count = tracks.len(), bytes = body.len(), "目录列表解析完成");
        Ok(tracks)
    }
}
