use super::{CoreState, UiAction};
use crate::app::UiFocus;
use crate::catalog::{ListingCommand, ListingEvent, LoadOutcome};
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    match cmd {
        AppCommand::Bootstrap => {
            let folder = state.settings.start_folder.clone();
            tracing::info!(folder = %folder, "加载启动目录");
            load_folder(state, &folder, true, effects);
            UiAction::Handled
        }
        AppCommand::Activate if state.app.ui_focus == UiFocus::Folders => {
            let Some(folder) = state.app.folders.get(state.app.folders_selected).cloned() else {
                return UiAction::Handled;
            };
            load_folder(state, &folder, false, effects);
            UiAction::Handled
        }
        _ => UiAction::NotHandled,
    }
}

pub(super) fn load_folder(
    state: &mut CoreState,
    folder: &str,
    autoload: bool,
    effects: &mut CoreEffects,
) {
    match state.catalog.begin_load(folder) {
        Ok(ticket) => {
            // 后发的加载覆盖先前的自动播放请求
            state.autoload_req = autoload.then_some(ticket.req_id);
            state.app.loading = true;
            state.app.status = format!("正在加载 {}...", ticket.folder);
            effects.send_listing_warn(
                ListingCommand::FetchFolder {
                    req_id: ticket.req_id,
                    folder: ticket.folder,
                },
                "ListingActor 通道已关闭：FetchFolder 发送失败",
            );
        }
        Err(e) => {
            tracing::warn!(folder, err = %e, "目录无效");
            state.app.status = format!("目录无效: {e}");
            effects.error(e.to_string());
        }
    }
    state.emit_state(effects);
}

pub(super) fn handle_listing_event(
    evt: ListingEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) {
    let ListingEvent::Folder {
        req_id,
        folder,
        result,
    } = evt;

    let autoload = state.autoload_req == Some(req_id);
    let outcome = state.catalog.finish_load(req_id, folder, result);
    if !matches!(outcome, LoadOutcome::Stale) && autoload {
        state.autoload_req = None;
    }
    state.app.loading = state.catalog.is_loading();

    match outcome {
        LoadOutcome::Stale => return,
        LoadOutcome::Replaced { count } => {
            state.app.folder = state.catalog.folder().map(str::to_owned);
            state.player.on_catalog_replaced(&state.catalog);
            state.app.playlist_selected = state.player.current_index().unwrap_or(0);
            state.app.status = match count {
                0 => "目录中没有可播放的曲目".to_owned(),
                n => format!("已加载 {n} 首"),
            };
            if autoload
                && count > 0
                && let Err(e) = state.player.autoload(&state.catalog, 0, effects)
            {
                tracing::warn!(err = %e, "自动加载第一首失败");
                state.app.status = e.to_string();
            }
        }
        LoadOutcome::Failed(e) => {
            state.app.status = format!("加载目录失败: {e}");
            effects.error(state.app.status.clone());
        }
    }
    state.emit_state(effects);
}
