use rodio::OutputStreamBuilder;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::select;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use super::AudioSettings;
use super::download::{DownloadConfig, build_http_client, download_to_temp};
use super::messages::{AudioCommand, AudioEvent};
use super::player::{PlayerState, Tick};
use crate::error::AudioError;

struct PendingLoad {
    play_id: u64,
    title: String,
    paused: bool,
    task: JoinHandle<()>,
}

/// 替换未完成的加载，旧的下载任务直接中止
fn replace_pending(slot: &mut Option<PendingLoad>, next: Option<PendingLoad>) {
    if let Some(old) = std::mem::replace(slot, next) {
        tracing::debug!(old_play_id = old.play_id, "取消未完成的加载");
        old.task.abort();
    }
}

/// 暂停期间错过的 tick 不补发
fn progress_ticker(period: Duration) -> Interval {
    let mut tick = tokio::time::interval(period);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tick
}

struct Downloaded {
    play_id: u64,
    result: Result<NamedTempFile, AudioError>,
}

struct AudioEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_dl: mpsc::Sender<Downloaded>,
    rx_dl: mpsc::Receiver<Downloaded>,
    http: reqwest::Client,
    download: DownloadConfig,
    state: PlayerState,
    pending: Option<PendingLoad>,
    progress_interval: Duration,
}

impl AudioEngine {
    async fn run(mut self) {
        let mut progress_tick = progress_ticker(self.progress_interval);

        loop {
            select! {
                biased;
                maybe_cmd = self.rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    self.handle_audio_command(cmd).await;
                }
                Some(done) = self.rx_dl.recv() => {
                    self.handle_downloaded(done).await;
                }
                _ = progress_tick.tick(), if self.state.is_playing() => {
                    self.emit_tick().await;
                }
            }
        }

        self.state.teardown();
        tracing::info!("AudioWorker 退出");
    }

    async fn handle_audio_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load {
                play_id,
                url,
                title,
                paused,
            } => {
                tracing::info!(play_id, title = %title, paused, "开始加载曲目");
                // 新会话创建前旧会话必须先拆掉
                self.state.teardown();

                let http = self.http.clone();
                let cfg = self.download.clone();
                let tx_dl = self.tx_dl.clone();
                let dl_title = title.clone();
                let task = tokio::task::spawn_local(async move {
                    let result = download_to_temp(&http, &url, &dl_title, &cfg).await;
                    let _ = tx_dl.send(Downloaded { play_id, result }).await;
                });
                replace_pending(
                    &mut self.pending,
                    Some(PendingLoad {
                        play_id,
                        title,
                        paused,
                        task,
                    }),
                );
            }
            AudioCommand::Stop => {
                replace_pending(&mut self.pending, None);
                self.state.teardown();
            }
            AudioCommand::Pause => {
                if let Some(p) = self.pending.as_mut() {
                    p.paused = true;
                }
                self.state.pause();
            }
            AudioCommand::Resume => {
                if let Some(p) = self.pending.as_mut() {
                    p.paused = false;
                }
                if let Err(e) = self.state.resume() {
                    tracing::warn!(err = %e, "恢复播放失败");
                    self.emit_error(0, e).await;
                }
            }
            AudioCommand::SeekToMs(ms) => {
                if let Err(e) = self.state.seek_to_ms(ms) {
                    tracing::warn!(ms, err = %e, "Seek 失败");
                    self.emit_error(0, e).await;
                }
            }
            AudioCommand::SetVolume(v) => {
                self.state.set_volume(v.clamp(0.0, 2.0));
            }
        }
    }

    async fn handle_downloaded(&mut self, done: Downloaded) {
        let Some(pending) = self.pending.take_if(|p| p.play_id == done.play_id) else {
            tracing::debug!(play_id = done.play_id, "丢弃过期的下载结果");
            return;
        };

        let result = done
            .result
            .and_then(|file| {
                self.state
                    .attach(pending.play_id, file, pending.title.clone(), pending.paused)
            });
        match result {
            Ok(duration_ms) => {
                let _ = self
                    .tx_evt
                    .send(AudioEvent::Loaded {
                        play_id: pending.play_id,
                        duration_ms,
                    })
                    .await;
            }
            Err(e) => {
                tracing::error!(play_id = pending.play_id, title = %pending.title, err = %e, "加载失败");
                self.emit_error(pending.play_id, e).await;
            }
        }
    }

    async fn emit_tick(&mut self) {
        let evt = match self.state.poll() {
            Some(Tick::Progress {
                play_id,
                position_ms,
                duration_ms,
            }) => AudioEvent::Progress {
                play_id,
                position_ms,
                duration_ms,
            },
            Some(Tick::Ended { play_id }) => {
                tracing::debug!(play_id, "播放结束");
                AudioEvent::Ended { play_id }
            }
            None => return,
        };
        let _ = self.tx_evt.send(evt).await;
    }

    async fn emit_error(&self, play_id: u64, err: AudioError) {
        let _ = self
            .tx_evt
            .send(AudioEvent::Error {
                play_id,
                message: err.to_string(),
            })
            .await;
    }
}

/// rodio 的输出流不能跨线程，引擎跑在独立线程的单线程 runtime 上
pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    let spawned = std::thread::Builder::new()
        .name("audio-engine".to_owned())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!(err = %e, "初始化音频线程 runtime 失败");
                    let _ = tx_evt.blocking_send(AudioEvent::Error {
                        play_id: 0,
                        message: format!("初始化音频线程失败: {e}"),
                    });
                    return;
                }
            };
            let local = tokio::task::LocalSet::new();
            local.block_on(&rt, async move {
                let http = match build_http_client(&settings.download) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::error!(err = %e, "初始化 HTTP 客户端失败");
                        let _ = tx_evt
                            .send(AudioEvent::Error {
                                play_id: 0,
                                message: e.to_string(),
                            })
                            .await;
                        return;
                    }
                };
                let mut stream = match OutputStreamBuilder::open_default_stream() {
                    Ok(v) => v,
                    Err(e) => {
                        let err = AudioError::OutputStream(e.to_string());
                        tracing::error!(err = %err, "初始化音频输出失败");
                        let _ = tx_evt
                            .send(AudioEvent::Error {
                                play_id: 0,
                                message: err.to_string(),
                            })
                            .await;
                        return;
                    }
                };
                // drop 时的提示会打到 stderr，和 TUI 冲突
                stream.log_on_drop(false);
                let mixer = stream.mixer().clone();
                let (tx_dl, rx_dl) = mpsc::channel::<Downloaded>(4);

                tracing::info!(
                    progress_interval_ms = settings.progress_interval_ms,
                    "AudioWorker 已启动"
                );
                let engine = AudioEngine {
                    tx_evt,
                    rx_cmd,
                    tx_dl,
                    rx_dl,
                    http,
                    download: settings.download,
                    state: PlayerState::new(mixer, stream),
                    pending: None,
                    progress_interval: Duration::from_millis(settings.progress_interval_ms.max(10)),
                };
                engine.run().await;
            });
        });

    if let Err(e) = spawned {
        tracing::error!(err = %e, "创建音频线程失败");
    }
}
