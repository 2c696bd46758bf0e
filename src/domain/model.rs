use std::borrow::Cow;
use std::fmt;

/// 目录列表中可播放文件的后缀
pub const AUDIO_EXTENSION: &str = ".mp3";

/// 目录中的一首曲目
///
/// 内部保存的是链接里的原始文件名（保留 `%20` 等转义），
/// 标题/艺人只在展示时派生，不单独存储。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track(String);

/// 展示用的标题/艺人
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackLabel {
    pub title: String,
    pub artist: String,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// "正在播放" 区域的标题/艺人
    ///
    /// 去掉后缀后按第一个 `-` 切分：标题原样保留，艺人去掉开头空白，缺失时为空串。
    pub fn now_playing_label(&self) -> TrackLabel {
        let name = self.display_name().replacen(AUDIO_EXTENSION, "", 1);
        let mut parts = name.split('-');
        let title = parts.next().unwrap_or_default().to_owned();
        let artist = parts
            .next()
            .map(|s| s.trim_start().to_owned())
            .unwrap_or_default();
        TrackLabel { title, artist }
    }

    /// 播放列表条目的标题/艺人（按 `" - "` 切分）
    pub fn playlist_label(&self) -> TrackLabel {
        let name = self.display_name();
        let title = name.split(" - ").next().unwrap_or_default().to_owned();
        let artist = name
            .replacen(AUDIO_EXTENSION, "", 1)
            .split(" - ")
            .nth(1)
            .unwrap_or_default()
            .to_owned();
        TrackLabel { title, artist }
    }

    fn display_name(&self) -> Cow<'_, str> {
        match urlencoding::decode(&self.0) {
            Ok(s) => s,
            Err(_) => Cow::Owned(self.0.replace("%20", " ")),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 播放列表中的一项，`index` 即激活时传给 `select` 的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub index: usize,
    pub label: TrackLabel,
}
