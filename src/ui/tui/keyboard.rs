use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

const SEEK_STEP_MS: u64 = 5_000;

/// 返回 true 表示退出 UI 循环
pub(super) async fn handle_key(key: KeyEvent, tx: &mpsc::Sender<AppCommand>) -> bool {
    // Some terminals/platforms may report both press and release events; we only act on press/repeat.
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    let Some(cmd) = command_for(key.code) else {
        return false;
    };
    let quit = matches!(cmd, AppCommand::Quit);
    if let Err(e) = tx.send(cmd).await {
        tracing::warn!(err = %e, "Core 通道已关闭");
        return true;
    }
    quit
}

fn command_for(code: KeyCode) -> Option<AppCommand> {
    let cmd = match code {
        KeyCode::Char('q') => AppCommand::Quit,
        KeyCode::Tab | KeyCode::BackTab => AppCommand::FocusNext,
        KeyCode::Up => AppCommand::MoveUp,
        KeyCode::Down => AppCommand::MoveDown,
        KeyCode::Enter => AppCommand::Activate,
        KeyCode::Char(' ') => AppCommand::TogglePause,
        KeyCode::Char('[') => AppCommand::Prev,
        KeyCode::Char(']') => AppCommand::Next,
        KeyCode::Left => AppCommand::SeekBackwardMs { ms: SEEK_STEP_MS },
        KeyCode::Right => AppCommand::SeekForwardMs { ms: SEEK_STEP_MS },
        KeyCode::Char('-') => AppCommand::VolumeDown,
        KeyCode::Char('=') | KeyCode::Char('+') => AppCommand::VolumeUp,
        _ => return None,
    };
    Some(cmd)
}
