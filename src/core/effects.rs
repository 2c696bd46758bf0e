use crate::app::{App, AppSnapshot, PlayerView};
use crate::audio_worker::AudioCommand;
use crate::catalog::ListingCommand;
use crate::messages::app::AppEvent;
use crate::player::PlaybackController;
use tokio::sync::mpsc;

#[derive(Default)]
pub struct CoreEffects {
    pub(crate) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<AppSnapshot>),
    EmitToast(String),
    EmitError(String),
    SendListing {
        cmd: ListingCommand,
        warn: &'static str,
    },
    SendAudio {
        cmd: AudioCommand,
        warn: &'static str,
    },
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App, player: &PlaybackController<PlayerView>) {
        self.actions
            .push(CoreEffect::EmitState(Box::new(AppSnapshot::new(app, player))));
    }

    pub fn send_listing_warn(&mut self, cmd: ListingCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendListing { cmd, warn });
    }

    pub fn send_audio_warn(&mut self, cmd: AudioCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendAudio { cmd, warn });
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitError(message.into()));
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_listing: &'a mpsc::Sender<ListingCommand>,
    pub(super) tx_audio: &'a mpsc::Sender<AudioCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitToast(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(msg)).await;
            }
            CoreEffect::EmitError(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Error(msg)).await;
            }
            CoreEffect::SendListing { cmd, warn } => {
                if let Err(e) = dispatch.tx_listing.send(cmd).await {
                    tracing::warn!(err = %e, "{warn}");
                }
            }
            CoreEffect::SendAudio { cmd, warn } => {
                if let Err(e) = dispatch.tx_audio.send(cmd).await {
                    tracing::warn!(err = %e, "{warn}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_helpers_keep_warn_context() {
        let mut effects = CoreEffects::default();
        effects.send_audio_warn(AudioCommand::Pause, "发送 Pause 失败");
        effects.send_listing_warn(
            ListingCommand::FetchFolder {
                req_id: 1,
                folder: "a/".to_owned(),
            },
            "发送 FetchFolder 失败",
        );

        let warns: Vec<&str> = effects
            .actions
            .iter()
            .filter_map(|e| match e {
                CoreEffect::SendAudio { warn, .. } | CoreEffect::SendListing { warn, .. } => {
                    Some(*warn)
                }
                _ => None,
            })
            .collect();
        assert_eq!(warns, vec!["发送 Pause 失败", "发送 FetchFolder 失败"]);
    }

    #[tokio::test]
    async fn closed_audio_channel_does_not_block_later_effects() {
        let (tx_listing, _rx_listing) = mpsc::channel(4);
        let (tx_audio, rx_audio) = mpsc::channel(4);
        let (tx_evt, mut rx_evt) = mpsc::channel(4);
        drop(rx_audio);

        let mut effects = CoreEffects::default();
        effects.send_audio_warn(AudioCommand::Pause, "发送 Pause 失败");
        effects.toast("仍然送达");

        let dispatch = CoreDispatch {
            tx_listing: &tx_listing,
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
        };
        run_effects(effects, &dispatch).await;

        match rx_evt.try_recv() {
            Ok(AppEvent::Toast(msg)) => assert_eq!(msg, "仍然送达"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
