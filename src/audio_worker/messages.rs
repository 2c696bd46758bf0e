#[derive(Debug)]
pub enum AudioCommand {
    /// 加载新曲目：旧会话先被拆除（暂停、回到 0、释放）
    Load {
        play_id: u64,
        url: String,
        title: String,
        /// 只加载不播放
        paused: bool,
    },
    /// 拆除当前会话
    Stop,
    Pause,
    Resume,
    SeekToMs(u64),
    SetVolume(f32),
}

#[derive(Debug)]
pub enum AudioEvent {
    Loaded {
        play_id: u64,
        duration_ms: Option<u64>,
    },
    /// 播放中周期性上报
    Progress {
        play_id: u64,
        position_ms: u64,
        duration_ms: Option<u64>,
    },
    Ended {
        play_id: u64,
    },
    /// play_id 为 0 表示与具体会话无关的错误
    Error {
        play_id: u64,
        message: String,
    },
}
