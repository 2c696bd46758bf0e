use crate::domain::model::PlaylistEntry;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    /// 当前暂停，按下会播放
    #[default]
    Play,
    /// 当前播放，按下会暂停
    Pause,
}

/// 播放器需要的展示能力，构造时注入
///
/// 播放列表条目被激活时，由界面把条目的 `index` 送回 `select`。
pub trait PlayerDisplay {
    fn render_playlist(&mut self, entries: &[PlaylistEntry]);
    fn set_now_playing(&mut self, title: &str, artist: &str);
    fn set_progress_text(&mut self, text: &str);
    /// 百分比，0..=100
    fn set_progress_position(&mut self, percent: f64);
    fn set_play_icon(&mut self, icon: PlayIcon);
}
