use crate::domain::model::PlaylistEntry;
use crate::player::{PlayIcon, PlaybackController, PlaybackState, PlayerDisplay};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UiFocus {
    Folders,
    #[default]
    Playlist,
}

/// Core 内部持有的界面状态（播放相关部分在 `PlayerView`）
#[derive(Debug, Clone)]
pub struct App {
    pub ui_focus: UiFocus,
    pub folders: Vec<String>,
    pub folders_selected: usize,
    pub playlist_selected: usize,
    pub folder: Option<String>,
    pub loading: bool,
    pub status: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            ui_focus: UiFocus::default(),
            folders: Vec::new(),
            folders_selected: 0,
            playlist_selected: 0,
            folder: None,
            loading: false,
            status: "Tab 切换焦点 | Enter 打开/播放 | 空格 播放/暂停 | q 退出".to_owned(),
        }
    }
}

/// 播放器写入的展示状态
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub playlist: Vec<PlaylistEntry>,
    pub title: String,
    pub artist: String,
    pub progress_text: String,
    pub progress_percent: f64,
    pub icon: PlayIcon,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            title: String::new(),
            artist: String::new(),
            progress_text: "00:00 / 00:00".to_owned(),
            progress_percent: 0.0,
            icon: PlayIcon::Play,
        }
    }
}

impl PlayerDisplay for PlayerView {
    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.playlist = entries.to_vec();
    }

    fn set_now_playing(&mut self, title: &str, artist: &str) {
        self.title = title.to_owned();
        self.artist = artist.to_owned();
    }

    fn set_progress_text(&mut self, text: &str) {
        self.progress_text = text.to_owned();
    }

    fn set_progress_position(&mut self, percent: f64) {
        self.progress_percent = percent;
    }

    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.icon = icon;
    }
}

#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub current: Option<usize>,
    pub title: String,
    pub artist: String,
    pub progress_text: String,
    pub progress_percent: f64,
    pub icon: PlayIcon,
    pub volume: f32,
}

#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub ui_focus: UiFocus,
    pub folders: Vec<String>,
    pub folders_selected: usize,
    pub folder: Option<String>,
    pub loading: bool,
    pub status: String,
    pub playlist: Vec<PlaylistEntry>,
    pub playlist_selected: usize,
    pub player: PlayerSnapshot,
}

impl AppSnapshot {
    /// 从 Core 状态创建 UI 渲染快照；快照经 channel 传给 UI，需要拥有所有权
    pub fn new(app: &App, player: &PlaybackController<PlayerView>) -> Self {
        let view = player.display();
        Self {
            ui_focus: app.ui_focus,
            folders: app.folders.clone(),
            folders_selected: app.folders_selected,
            folder: app.folder.clone(),
            loading: app.loading,
            status: app.status.clone(),
            playlist: view.playlist.clone(),
            playlist_selected: app.playlist_selected,
            player: PlayerSnapshot {
                state: player.state(),
                current: player.current_index(),
                title: view.title.clone(),
                artist: view.artist.clone(),
                progress_text: view.progress_text.clone(),
                progress_percent: view.progress_percent,
                icon: view.icon,
                volume: player.volume(),
            },
        }
    }

    /// UI 启动时还没有收到 Core 的第一帧
    pub fn initial(folders: Vec<String>) -> Self {
        let player = PlaybackController::new(PlayerView::default(), 1.0);
        let app = App {
            folders,
            ..App::default()
        };
        Self::new(&app, &player)
    }
}
