use super::{CoreState, UiAction};
use crate::app::UiFocus;
use crate::audio_worker::AudioEvent;
use crate::core::effects::CoreEffects;
use crate::error::PlayerError;
use crate::messages::app::AppCommand;

const VOLUME_STEP: f32 = 0.05;

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    let CoreState {
        app,
        catalog,
        player,
        ..
    } = state;

    let result = match cmd {
        AppCommand::Activate if app.ui_focus == UiFocus::Playlist => {
            player.select(catalog, app.playlist_selected, effects)
        }
        AppCommand::TogglePause => player.toggle_play_pause(effects),
        AppCommand::Prev => player.previous(catalog, effects),
        AppCommand::Next => player.next(catalog, effects),
        AppCommand::SeekBackwardMs { ms } => {
            player.seek_by(-i64::try_from(*ms).unwrap_or(i64::MAX), effects)
        }
        AppCommand::SeekForwardMs { ms } => {
            player.seek_by(i64::try_from(*ms).unwrap_or(i64::MAX), effects)
        }
        AppCommand::VolumeDown => {
            player.adjust_volume(-VOLUME_STEP, effects);
            app.status = format!("音量: {:.0}%", player.volume() * 100.0);
            Ok(())
        }
        AppCommand::VolumeUp => {
            player.adjust_volume(VOLUME_STEP, effects);
            app.status = format!("音量: {:.0}%", player.volume() * 100.0);
            Ok(())
        }
        _ => return UiAction::NotHandled,
    };

    match result {
        Ok(()) => {
            if let Some(index) = player.current_index() {
                app.playlist_selected = index;
            }
        }
        Err(e) => report_player_error(app, &e, effects),
    }
    state.emit_state(effects);
    UiAction::Handled
}

fn report_player_error(app: &mut crate::app::App, err: &PlayerError, effects: &mut CoreEffects) {
    tracing::warn!(err = %err, "播放操作失败");
    app.status = err.to_string();
    effects.toast(err.to_string());
}

pub(super) fn handle_audio_event(evt: AudioEvent, state: &mut CoreState, effects: &mut CoreEffects) {
    match evt {
        AudioEvent::Loaded {
            play_id,
            duration_ms,
        } => {
            if state.player.on_loaded(play_id, duration_ms) {
                tracing::debug!(play_id, ?duration_ms, "曲目已就绪");
                state.emit_state(effects);
            }
        }
        AudioEvent::Progress {
            play_id,
            position_ms,
            duration_ms,
        } => {
            if state.player.on_progress(play_id, position_ms, duration_ms) {
                state.emit_state(effects);
            }
        }
        AudioEvent::Ended { play_id } => {
            if state.player.on_ended(play_id) {
                tracing::info!(play_id, "播放结束");
                state.app.status = "播放结束".to_owned();
                state.emit_state(effects);
            }
        }
        AudioEvent::Error { play_id, message } => {
            // play_id 为 0 的是引擎级错误，总是上报
            if play_id == 0 || state.player.on_error(play_id) {
                tracing::warn!(play_id, message = %message, "音频错误");
                state.app.status = format!("播放失败: {message}");
                effects.error(state.app.status.clone());
                state.emit_state(effects);
            } else {
                tracing::debug!(play_id, "忽略过期会话的音频错误");
            }
        }
    }
}
