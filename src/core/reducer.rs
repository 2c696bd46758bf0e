use crate::app::{App, PlayerView};
use crate::audio_worker::{AudioBackend, AudioCommand, AudioEvent};
use crate::catalog::{Catalog, ListingClient, ListingEvent};
use crate::error::{AppError, CatalogError};
use crate::messages::app::{AppCommand, AppEvent};
use crate::player::PlaybackController;
use crate::settings::{self as app_settings, AppSettings};

use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::core::effects::{CoreDispatch, CoreEffects, run_effects};

mod catalog;
mod player;
mod ui;

enum CoreMsg {
    Ui(AppCommand),
    Listing(ListingEvent),
    Audio(AudioEvent),
}

struct CoreState {
    app: App,
    catalog: Catalog,
    player: PlaybackController<PlayerView>,
    settings: AppSettings,
    // 启动目录的加载请求；它完成后自动加载第一首（暂停）
    autoload_req: Option<u64>,
}

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

impl CoreState {
    fn new(settings: AppSettings) -> Self {
        let app = App {
            folders: settings.folders.clone(),
            ..App::default()
        };
        Self {
            app,
            catalog: Catalog::new(settings.base_url.clone()),
            player: PlaybackController::new(PlayerView::default(), settings.volume),
            settings,
            autoload_req: None,
        }
    }

    fn emit_state(&self, effects: &mut CoreEffects) {
        effects.emit_state(&self.app, &self.player);
    }
}

/// 返回 true 表示退出
fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match msg {
        CoreMsg::Ui(cmd) => {
            match ui::handle_ui(&cmd, state, effects) {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }
            match catalog::handle_ui(&cmd, state, effects) {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }
            if matches!(player::handle_ui(&cmd, state, effects), UiAction::Quit) {
                return true;
            }
        }
        CoreMsg::Listing(evt) => catalog::handle_listing_event(evt, state, effects),
        CoreMsg::Audio(evt) => player::handle_audio_event(evt, state, effects),
    }

    false
}

pub fn spawn_app_actor(
    settings: AppSettings,
    data_dir: PathBuf,
    audio_backend: AudioBackend,
) -> Result<(mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>), AppError> {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let client = ListingClient::new(&settings.listing_config()).map_err(CatalogError::from)?;
    let (tx_listing, mut rx_listing) = crate::catalog::spawn_listing_actor(client);
    let (tx_audio, mut rx_audio_evt) =
        crate::audio_worker::spawn_audio_worker(audio_backend, settings.audio_settings());

    tokio::spawn(async move {
        let mut state = CoreState::new(settings);
        let _ = tx_audio
            .send(AudioCommand::SetVolume(state.player.volume()))
            .await;

        let dispatch = CoreDispatch {
            tx_listing: &tx_listing,
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
        };

        loop {
            let msg = tokio::select! {
                Some(cmd) = rx_cmd.recv() => CoreMsg::Ui(cmd),
                Some(evt) = rx_listing.recv() => CoreMsg::Listing(evt),
                Some(evt) = rx_audio_evt.recv() => CoreMsg::Audio(evt),
                else => break,
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects);
            run_effects(effects, &dispatch).await;
            if should_quit {
                let _ = tx_audio.send(AudioCommand::Stop).await;
                state.settings.volume = state.player.volume();
                match app_settings::save_settings(&data_dir, &state.settings) {
                    Ok(()) => tracing::info!(volume = state.settings.volume, "设置已保存"),
                    Err(e) => tracing::error!("保存设置失败: {}", e),
                }
                break;
            }
        }
        tracing::info!("Core 退出");
    });

    Ok((tx_cmd, rx_evt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreEffect;
    use crate::domain::model::Track;
    use crate::error::FetchError;
    use crate::player::PlaybackState;

    pub(super) fn state() -> CoreState {
        CoreState::new(AppSettings::default())
    }

    pub(super) fn listing_req(effects: &CoreEffects) -> Option<(u64, String)> {
        effects.actions.iter().find_map(|e| match e {
            CoreEffect::SendListing {
                cmd: crate::catalog::ListingCommand::FetchFolder { req_id, folder },
                ..
            } => Some((*req_id, folder.clone())),
            _ => None,
        })
    }

    pub(super) fn listing_done(req_id: u64, folder: &str, names: &[&str]) -> CoreMsg {
        CoreMsg::Listing(ListingEvent::Folder {
            req_id,
            folder: folder.to_owned(),
            result: Ok(names.iter().map(|n| Track::new(*n)).collect()),
        })
    }

    #[test]
    fn bootstrap_loads_start_folder_and_autoloads_first_track() {
        let mut state = state();
        let mut effects = CoreEffects::default();
        assert!(!reduce(CoreMsg::Ui(AppCommand::Bootstrap), &mut state, &mut effects));
        let (req_id, folder) = listing_req(&effects).expect("listing request");
        assert_eq!(folder, "songs/Pop");
        assert!(state.app.loading);

        let mut effects = CoreEffects::default();
        reduce(
            listing_done(req_id, &folder, &["A - Song1.mp3", "B - Song2.mp3"]),
            &mut state,
            &mut effects,
        );

        assert_eq!(state.catalog.len(), 2);
        assert_eq!(state.player.state(), PlaybackState::Paused);
        assert_eq!(state.player.current_index(), Some(0));
        assert_eq!(state.player.display().title, "A ");
        assert_eq!(state.player.display().artist, "Song1");
        assert_eq!(state.player.display().playlist.len(), 2);
        assert!(!state.app.loading);
        assert!(effects.actions.iter().any(|e| matches!(
            e,
            CoreEffect::SendAudio {
                cmd: AudioCommand::Load { paused: true, .. },
                ..
            }
        )));
    }

    #[test]
    fn failed_listing_keeps_state_and_reports() {
        let mut state = state();
        let mut effects = CoreEffects::default();
        reduce(CoreMsg::Ui(AppCommand::Bootstrap), &mut state, &mut effects);
        let (req_id, folder) = listing_req(&effects).expect("listing request");

        let mut effects = CoreEffects::default();
        reduce(
            CoreMsg::Listing(ListingEvent::Folder {
                req_id,
                folder,
                result: Err(FetchError::BadUrl("bad".to_owned())),
            }),
            &mut state,
            &mut effects,
        );

        assert!(state.catalog.is_empty());
        assert_eq!(state.player.state(), PlaybackState::Idle);
        assert!(state.app.status.contains("加载目录失败"));
        assert!(
            effects
                .actions
                .iter()
                .any(|e| matches!(e, CoreEffect::EmitError(_)))
        );
    }

    #[test]
    fn quit_is_reported() {
        let mut state = state();
        let mut effects = CoreEffects::default();
        assert!(reduce(CoreMsg::Ui(AppCommand::Quit), &mut state, &mut effects));
    }
}
