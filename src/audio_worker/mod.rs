mod download;
mod engine;
mod messages;
mod null_engine;
mod player;

pub use download::DownloadConfig;
pub use messages::{AudioCommand, AudioEvent};

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBackend {
    /// rodio 默认输出设备
    Real,
    /// 不出声，只回报事件（无声卡环境 / 调试）
    Null,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    /// 进度上报间隔（毫秒）
    pub progress_interval_ms: u64,
    pub download: DownloadConfig,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 250,
            download: DownloadConfig::default(),
        }
    }
}

pub fn spawn_audio_worker(
    backend: AudioBackend,
    settings: AudioSettings,
) -> (mpsc::Sender<AudioCommand>, mpsc::Receiver<AudioEvent>) {
    let (tx_cmd, rx_cmd) = mpsc::channel::<AudioCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AudioEvent>(64);

    tracing::info!(?backend, "启动 AudioWorker");
    match backend {
        AudioBackend::Real => engine::spawn(rx_cmd, tx_evt, settings),
        AudioBackend::Null => null_engine::spawn(rx_cmd, tx_evt),
    }

    (tx_cmd, rx_evt)
}
