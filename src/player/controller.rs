use super::display::{PlayIcon, PlayerDisplay};
use super::progress::{playback_percent, progress_text};
use crate::audio_worker::AudioCommand;
use crate::catalog::Catalog;
use crate::core::CoreEffects;
use crate::domain::model::Track;
use crate::error::PlayerError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

const INITIAL_PROGRESS: &str = "00:00 / 00:00";

/// 同一时刻只持有一个播放会话；音频命令经 `CoreEffects` 发往 AudioWorker
pub struct PlaybackController<D> {
    display: D,
    state: PlaybackState,
    current: Option<usize>,
    // 当前会话加载的曲目，换目录后用来重新定位 current
    loaded: Option<Track>,
    loaded_url: Option<String>,
    // 会话加载失败，AudioWorker 侧没有可恢复的音频
    load_failed: bool,
    play_id: u64,
    position_ms: u64,
    duration_ms: Option<u64>,
    volume: f32,
}

impl<D: PlayerDisplay> PlaybackController<D> {
    pub fn new(display: D, volume: f32) -> Self {
        Self {
            display,
            state: PlaybackState::Idle,
            current: None,
            loaded: None,
            loaded_url: None,
            load_failed: false,
            play_id: 0,
            position_ms: 0,
            duration_ms: None,
            volume: volume.clamp(0.0, 2.0),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn loaded_track(&self) -> Option<&Track> {
        self.loaded.as_ref()
    }

    pub fn play_id(&self) -> u64 {
        self.play_id
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn select(
        &mut self,
        catalog: &Catalog,
        index: usize,
        effects: &mut CoreEffects,
    ) -> Result<(), PlayerError> {
        self.load(catalog, index, false, effects)
    }

    /// 加载但不开始播放
    pub fn autoload(
        &mut self,
        catalog: &Catalog,
        index: usize,
        effects: &mut CoreEffects,
    ) -> Result<(), PlayerError> {
        self.load(catalog, index, true, effects)
    }

    fn load(
        &mut self,
        catalog: &Catalog,
        index: usize,
        paused: bool,
        effects: &mut CoreEffects,
    ) -> Result<(), PlayerError> {
        let (Some(track), Some(url)) = (catalog.get(index), catalog.track_url(index)) else {
            return Err(PlayerError::InvalidTrack {
                index,
                len: catalog.len(),
            });
        };

        if self.state != PlaybackState::Idle {
            effects.send_audio_warn(AudioCommand::Stop, "AudioWorker 通道已关闭：Stop 发送失败");
        }

        self.play_id = self.play_id.wrapping_add(1).max(1);
        self.current = Some(index);
        self.loaded = Some(track.clone());
        self.loaded_url = Some(url.clone());
        self.load_failed = false;
        self.position_ms = 0;
        self.duration_ms = None;
        self.state = if paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        };

        tracing::info!(
            play_id = self.play_id,
            index,
            track = %track,
            paused,
            "加载曲目"
        );
        effects.send_audio_warn(
            AudioCommand::Load {
                play_id: self.play_id,
                url,
                title: track.id().to_owned(),
                paused,
            },
            "AudioWorker 通道已关闭：Load 发送失败",
        );

        let label = track.now_playing_label();
        self.display.set_now_playing(&label.title, &label.artist);
        self.display.set_progress_text(INITIAL_PROGRESS);
        self.display.set_progress_position(0.0);
        self.display.set_play_icon(if paused {
            PlayIcon::Play
        } else {
            PlayIcon::Pause
        });
        Ok(())
    }

    pub fn toggle_play_pause(&mut self, effects: &mut CoreEffects) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Idle => Err(PlayerError::NoActiveTrack),
            PlaybackState::Playing => {
                effects.send_audio_warn(AudioCommand::Pause, "AudioWorker 通道已关闭：Pause 发送失败");
                self.state = PlaybackState::Paused;
                self.display.set_play_icon(PlayIcon::Play);
                Ok(())
            }
            PlaybackState::Paused if self.load_failed => self.reload(effects),
            PlaybackState::Paused => {
                effects.send_audio_warn(AudioCommand::Resume, "AudioWorker 通道已关闭：Resume 发送失败");
                self.state = PlaybackState::Playing;
                self.display.set_play_icon(PlayIcon::Pause);
                Ok(())
            }
        }
    }

    /// 用新的 play_id 重新加载失败的会话并直接播放
    fn reload(&mut self, effects: &mut CoreEffects) -> Result<(), PlayerError> {
        let (Some(track), Some(url)) = (self.loaded.as_ref(), self.loaded_url.clone()) else {
            return Err(PlayerError::NoActiveTrack);
        };
        self.play_id = self.play_id.wrapping_add(1).max(1);
        self.load_failed = false;
        self.position_ms = 0;
        self.duration_ms = None;
        self.state = PlaybackState::Playing;

        tracing::info!(play_id = self.play_id, track = %track, "上次加载失败，重新加载");
        effects.send_audio_warn(
            AudioCommand::Load {
                play_id: self.play_id,
                url,
                title: track.id().to_owned(),
                paused: false,
            },
            "AudioWorker 通道已关闭：Load 发送失败",
        );

        self.display.set_progress_text(INITIAL_PROGRESS);
        self.display.set_progress_position(0.0);
        self.display.set_play_icon(PlayIcon::Pause);
        Ok(())
    }

    pub fn previous(
        &mut self,
        catalog: &Catalog,
        effects: &mut CoreEffects,
    ) -> Result<(), PlayerError> {
        match self.current {
            Some(index) if index > 0 => self.select(catalog, index - 1, effects),
            _ => Ok(()),
        }
    }

    /// 已加载的曲目不在当前列表中时从第一首开始
    pub fn next(&mut self, catalog: &Catalog, effects: &mut CoreEffects) -> Result<(), PlayerError> {
        match self.current {
            Some(index) if index + 1 < catalog.len() => self.select(catalog, index + 1, effects),
            Some(_) => Ok(()),
            None if self.loaded.is_some() && !catalog.is_empty() => self.select(catalog, 0, effects),
            None => Ok(()),
        }
    }

    /// 过期会话的事件返回 false
    pub fn on_loaded(&mut self, play_id: u64, duration_ms: Option<u64>) -> bool {
        if play_id != self.play_id {
            return false;
        }
        self.duration_ms = duration_ms;
        true
    }

    pub fn on_progress(&mut self, play_id: u64, position_ms: u64, duration_ms: Option<u64>) -> bool {
        if play_id != self.play_id || self.state == PlaybackState::Idle {
            return false;
        }
        self.position_ms = position_ms;
        if duration_ms.is_some() {
            self.duration_ms = duration_ms;
        }
        self.render_progress();
        true
    }

    /// 播完停在末尾，再恢复会从头播放
    pub fn on_ended(&mut self, play_id: u64) -> bool {
        if play_id != self.play_id || self.state == PlaybackState::Idle {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.display.set_play_icon(PlayIcon::Play);
        true
    }

    /// 当前会话加载失败；play_id 为 0 表示与具体会话无关的引擎错误
    pub fn on_error(&mut self, play_id: u64) -> bool {
        if play_id != self.play_id || self.state == PlaybackState::Idle {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.load_failed = true;
        self.display.set_play_icon(PlayIcon::Play);
        true
    }

    pub fn seek_by(&mut self, delta_ms: i64, effects: &mut CoreEffects) -> Result<(), PlayerError> {
        if self.state == PlaybackState::Idle {
            return Err(PlayerError::NoActiveTrack);
        }
        let mut target = self.position_ms.saturating_add_signed(delta_ms);
        if let Some(total) = self.duration_ms {
            target = target.min(total);
        }
        tracing::debug!(play_id = self.play_id, from = self.position_ms, to = target, "Seek");
        self.position_ms = target;
        effects.send_audio_warn(
            AudioCommand::SeekToMs(target),
            "AudioWorker 通道已关闭：Seek 发送失败",
        );
        self.render_progress();
        Ok(())
    }

    pub fn adjust_volume(&mut self, step: f32, effects: &mut CoreEffects) {
        self.volume = (self.volume + step).clamp(0.0, 2.0);
        effects.send_audio_warn(
            AudioCommand::SetVolume(self.volume),
            "AudioWorker 通道已关闭：SetVolume 发送失败",
        );
    }

    /// 曲目列表整体替换后重绘播放列表，并按曲目标识重新定位当前位置
    pub fn on_catalog_replaced(&mut self, catalog: &Catalog) {
        self.display.render_playlist(&catalog.playlist_entries());
        self.current = self
            .loaded
            .as_ref()
            .and_then(|track| catalog.position_of(track));
        tracing::debug!(current = ?self.current, "播放位置已重新定位");
    }

    fn render_progress(&mut self) {
        let elapsed = self.position_ms as f64 / 1000.0;
        let duration = self
            .duration_ms
            .map(|ms| ms as f64 / 1000.0)
            .unwrap_or(f64::NAN);
        self.display
            .set_progress_text(&progress_text(elapsed, duration));
        if let Some(percent) = playback_percent(elapsed, duration) {
            self.display.set_progress_position(percent.clamp(0.0, 100.0));
        }
    }
}
