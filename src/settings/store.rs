use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio_worker::{AudioSettings, DownloadConfig};
use crate::catalog::ListingClientConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    // 曲库
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
    #[serde(default = "default_start_folder")]
    pub start_folder: String,

    // 播放器设置
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    // 网络/下载设置
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_http_connect_timeout_secs")]
    pub http_connect_timeout_secs: u64,
    #[serde(default = "default_download_retries")]
    pub download_retries: u32,
    #[serde(default = "default_download_retry_backoff_ms")]
    pub download_retry_backoff_ms: u64,
    #[serde(default = "default_download_retry_backoff_max_ms")]
    pub download_retry_backoff_max_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            folders: default_folders(),
            start_folder: default_start_folder(),
            volume: default_volume(),
            progress_interval_ms: default_progress_interval_ms(),
            http_timeout_secs: default_http_timeout_secs(),
            http_connect_timeout_secs: default_http_connect_timeout_secs(),
            download_retries: default_download_retries(),
            download_retry_backoff_ms: default_download_retry_backoff_ms(),
            download_retry_backoff_max_ms: default_download_retry_backoff_max_ms(),
        }
    }
}

impl AppSettings {
    pub fn listing_config(&self) -> ListingClientConfig {
        ListingClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.http_timeout_secs,
            connect_timeout_secs: self.http_connect_timeout_secs,
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            progress_interval_ms: self.progress_interval_ms,
            download: DownloadConfig {
                http_timeout_secs: self.http_timeout_secs,
                http_connect_timeout_secs: self.http_connect_timeout_secs,
                retries: self.download_retries,
                retry_backoff_ms: self.download_retry_backoff_ms,
                retry_backoff_max_ms: self.download_retry_backoff_max_ms,
            },
        }
    }
}

// 默认值函数（用于 serde default）
fn default_base_url() -> String { "http://127.0.0.1:5500".to_owned() }
fn default_folders() -> Vec<String> { vec![default_start_folder()] }
fn default_start_folder() -> String { "songs/Pop".to_owned() }
fn default_volume() -> f32 { 1.0 }
fn default_progress_interval_ms() -> u64 { 250 }
fn default_http_timeout_secs() -> u64 { 30 }
fn default_http_connect_timeout_secs() -> u64 { 10 }
fn default_download_retries() -> u32 { 2 }
fn default_download_retry_backoff_ms() -> u64 { 250 }
fn default_download_retry_backoff_max_ms() -> u64 { 2000 }

/// 系统 data_local_dir，取不到时退回临时目录
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "dirplay", "dirplay")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("dirplay"))
}

pub fn load_settings(data_dir: &Path) -> AppSettings {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return AppSettings::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %p.display(), err = %e, "settings.json 解析失败，使用默认设置");
            AppSettings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, s: &AppSettings) -> Result<(), AppError> {
    fs::create_dir_all(data_dir)?;
    let p = settings_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, &p) {
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| e)?;
    }
    Ok(())
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}
