use tokio::sync::mpsc;

use super::messages::{AudioCommand, AudioEvent};

/// 不接声卡的引擎：加载立即成功，不上报进度
struct NullEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    play_id: Option<u64>,
    paused: bool,
}

impl NullEngine {
    async fn run(mut self) {
        while let Some(cmd) = self.rx_cmd.recv().await {
            self.handle_audio_command(cmd).await;
        }
    }

    async fn handle_audio_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load {
                play_id,
                title,
                paused,
                ..
            } => {
                tracing::debug!(play_id, title = %title, paused, "NullEngine 加载");
                self.play_id = Some(play_id);
                self.paused = paused;
                let _ = self
                    .tx_evt
                    .send(AudioEvent::Loaded {
                        play_id,
                        duration_ms: None,
                    })
                    .await;
            }
            AudioCommand::Stop => {
                self.play_id = None;
                self.paused = false;
            }
            AudioCommand::Pause | AudioCommand::Resume => {
                self.paused = matches!(cmd, AudioCommand::Pause);
                tracing::trace!(play_id = ?self.play_id, paused = self.paused, "NullEngine 切换暂停");
            }
            AudioCommand::SeekToMs(_) => {}
            AudioCommand::SetVolume(_) => {}
        }
    }
}

pub(super) fn spawn(rx_cmd: mpsc::Receiver<AudioCommand>, tx_evt: mpsc::Sender<AudioEvent>) {
    tokio::spawn(async move {
        let engine = NullEngine {
            tx_evt,
            rx_cmd,
            play_id: None,
            paused: false,
        };
        engine.run().await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reports_loaded_with_unknown_duration() {
        let (tx_cmd, rx_cmd) = mpsc::channel(4);
        let (tx_evt, mut rx_evt) = mpsc::channel(4);
        spawn(rx_cmd, tx_evt);

        tx_cmd
            .send(AudioCommand::Load {
                play_id: 7,
                url: "http://127.0.0.1/songs/Pop/A.mp3".to_owned(),
                title: "A.mp3".to_owned(),
                paused: true,
            })
            .await
            .expect("send");

        match rx_evt.recv().await {
            Some(AudioEvent::Loaded {
                play_id: 7,
                duration_ms: None,
            }) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
