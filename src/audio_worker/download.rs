use futures_util::StreamExt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::error::AudioError;

/// 音频下载配置
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// HTTP 超时（秒）
    pub http_timeout_secs: u64,
    /// HTTP 连接超时（秒）
    pub http_connect_timeout_secs: u64,
    /// 下载重试次数
    pub retries: u32,
    /// 重试退避初始时间（毫秒）
    pub retry_backoff_ms: u64,
    /// 重试退避最大时间（毫秒）
    pub retry_backoff_max_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            http_connect_timeout_secs: 10,
            retries: 2,
            retry_backoff_ms: 250,
            retry_backoff_max_ms: 2000,
        }
    }
}

pub(super) fn build_http_client(cfg: &DownloadConfig) -> Result<reqwest::Client, AudioError> {
    reqwest::Client::builder()
        .user_agent("dirplay")
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .connect_timeout(Duration::from_secs(cfg.http_connect_timeout_secs))
        .build()
        .map_err(AudioError::HttpClient)
}

/// 把曲目下载到临时文件，文件随返回值释放而删除
pub(super) async fn download_to_temp(
    http: &reqwest::Client,
    url: &str,
    title: &str,
    cfg: &DownloadConfig,
) -> Result<NamedTempFile, AudioError> {
    let mut attempt = 0u32;
    loop {
        match download_once(http, url, title).await {
            Ok(tmp) => return Ok(tmp),
            Err(e) if attempt < cfg.retries && e.is_retryable() => {
                tracing::debug!(attempt, title, err = %e, "下载失败，准备重试");
                sleep_backoff(attempt, cfg.retry_backoff_ms, cfg.retry_backoff_max_ms).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn download_once(
    http: &reqwest::Client,
    url: &str,
    title: &str,
) -> Result<NamedTempFile, AudioError> {
    let write_err = |source: std::io::Error| AudioError::Write {
        title: title.to_owned(),
        source,
    };

    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|source| AudioError::Download {
            title: title.to_owned(),
            source,
        })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AudioError::DownloadStatus {
            title: title.to_owned(),
            status,
        });
    }

    let tmp = tempfile::Builder::new()
        .prefix("dirplay-")
        .suffix(".mp3")
        .tempfile()
        .map_err(write_err)?;
    let std_file = tmp.reopen().map_err(write_err)?;
    let mut file = tokio::fs::File::from_std(std_file);

    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|source| AudioError::Download {
            title: title.to_owned(),
            source,
        })?;
        file.write_all(&bytes).await.map_err(write_err)?;
    }
    file.flush().await.map_err(write_err)?;

    Ok(tmp)
}

async fn sleep_backoff(attempt: u32, base_ms: u64, max_ms: u64) {
    let exp = base_ms.saturating_mul(2u64.saturating_pow(attempt.min(6)));
    let mut ms = exp.min(max_ms);

    // 0..=250ms 的抖动，不引入 RNG
    let jitter = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
        % 251;
    ms = ms.saturating_add(jitter).min(max_ms);

    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_cfg() -> DownloadConfig {
        DownloadConfig {
            retries: 1,
            retry_backoff_ms: 1,
            retry_backoff_max_ms: 1,
            ..DownloadConfig::default()
        }
    }

    #[tokio::test]
    async fn downloads_body_into_temp_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/songs/Pop/A.mp3")
            .with_status(200)
            .with_body(b"ID3fake-audio")
            .create_async()
            .await;

        let cfg = fast_cfg();
        let http = build_http_client(&cfg).expect("client");
        let url = format!("{}/songs/Pop/A.mp3", server.url());
        let tmp = download_to_temp(&http, &url, "A.mp3", &cfg)
            .await
            .expect("download");

        let bytes = std::fs::read(tmp.path()).expect("read");
        assert_eq!(bytes, b"ID3fake-audio");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/songs/Pop/missing.mp3")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let cfg = fast_cfg();
        let http = build_http_client(&cfg).expect("client");
        let url = format!("{}/songs/Pop/missing.mp3", server.url());
        let err = download_to_temp(&http, &url, "missing.mp3", &cfg)
            .await
            .expect_err("404");

        assert!(matches!(err, AudioError::DownloadStatus { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/songs/Pop/flaky.mp3")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let cfg = fast_cfg();
        let http = build_http_client(&cfg).expect("client");
        let url = format!("{}/songs/Pop/flaky.mp3", server.url());
        let err = download_to_temp(&http, &url, "flaky.mp3", &cfg)
            .await
            .expect_err("503");

        assert!(err.is_retryable());
        mock.assert_async().await;
    }
}
