use crate::app::AppSnapshot;

#[derive(Debug)]
pub enum AppCommand {
    Bootstrap,
    FocusNext,
    MoveUp,
    MoveDown,
    /// 目录栏：加载选中目录；播放列表：播放选中曲目
    Activate,
    TogglePause,
    Prev,
    Next,
    SeekBackwardMs { ms: u64 },
    SeekForwardMs { ms: u64 },
    VolumeDown,
    VolumeUp,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    State(Box<AppSnapshot>),
    Toast(String),
    Error(String),
}
