//! 播放控制：会话状态机、进度格式化、展示接口

mod controller;
mod display;
mod progress;

pub use controller::{PlaybackController, PlaybackState};
pub use display::{PlayIcon, PlayerDisplay};
pub use progress::{format_time, playback_percent, progress_text};
