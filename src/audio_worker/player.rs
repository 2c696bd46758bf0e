use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::error::AudioError;

/// 当前唯一的播放会话
struct ActiveSession {
    play_id: u64,
    sink: Sink,
    // 临时文件和会话同生命周期
    file: NamedTempFile,
    title: String,
    duration_ms: Option<u64>,
    // 用 skip_duration 重建后 get_pos 从 0 算起，需要加回跳过的部分
    offset: Duration,
    paused: bool,
    ended: bool,
}

pub(super) enum Tick {
    Progress {
        play_id: u64,
        position_ms: u64,
        duration_ms: Option<u64>,
    },
    Ended {
        play_id: u64,
    },
}

pub struct PlayerState {
    mixer: Mixer,
    #[allow(dead_code)]
    stream: OutputStream,
    current: Option<ActiveSession>,
    volume: f32,
}

impl PlayerState {
    pub fn new(mixer: Mixer, stream: OutputStream) -> Self {
        Self {
            mixer,
            stream,
            current: None,
            volume: 1.0,
        }
    }

    /// 暂停、回到开头、释放；无会话时什么也不做
    pub fn teardown(&mut self) {
        if let Some(cur) = self.current.take() {
            tracing::debug!(play_id = cur.play_id, "拆除当前会话");
            cur.sink.pause();
            if let Err(e) = cur.sink.try_seek(Duration::ZERO) {
                tracing::trace!(play_id = cur.play_id, err = %e, "回到开头失败");
            }
            cur.sink.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|c| !c.paused && !c.ended)
    }

    pub fn attach(
        &mut self,
        play_id: u64,
        file: NamedTempFile,
        title: String,
        paused: bool,
    ) -> Result<Option<u64>, AudioError> {
        self.teardown();

        let (sink, duration_ms) = build_sink(&self.mixer, file.path(), None, &title)?;
        sink.set_volume(self.volume);
        if paused {
            sink.pause();
        } else {
            sink.play();
        }

        tracing::debug!(play_id, title = %title, ?duration_ms, paused, "会话已加载");
        self.current = Some(ActiveSession {
            play_id,
            sink,
            file,
            title,
            duration_ms,
            offset: Duration::ZERO,
            paused,
            ended: false,
        });
        Ok(duration_ms)
    }

    pub fn pause(&mut self) {
        if let Some(cur) = self.current.as_mut() {
            cur.sink.pause();
            cur.paused = true;
        }
    }

    /// 播放结束后再恢复会从头开始
    pub fn resume(&mut self) -> Result<(), AudioError> {
        let Some(cur) = self.current.as_mut() else {
            return Ok(());
        };
        if cur.ended || cur.sink.empty() {
            let (sink, _) = build_sink(&self.mixer, cur.file.path(), None, &cur.title)?;
            sink.set_volume(self.volume);
            cur.sink.stop();
            cur.sink = sink;
            cur.offset = Duration::ZERO;
            cur.ended = false;
        }
        cur.sink.play();
        cur.paused = false;
        Ok(())
    }

    pub fn seek_to_ms(&mut self, position_ms: u64) -> Result<(), AudioError> {
        let Some(cur) = self.current.as_mut() else {
            return Ok(());
        };
        let pos = Duration::from_millis(position_ms);
        if cur.sink.try_seek(pos).is_ok() {
            cur.offset = Duration::ZERO;
            cur.ended = false;
            return Ok(());
        }

        // 解码器不支持 seek 时重建 sink 并跳过前段
        tracing::debug!(play_id = cur.play_id, position_ms, "try_seek 失败，重建 sink");
        let (sink, _) = build_sink(&self.mixer, cur.file.path(), Some(pos), &cur.title)?;
        sink.set_volume(self.volume);
        if cur.paused {
            sink.pause();
        } else {
            sink.play();
        }
        cur.sink.stop();
        cur.sink = sink;
        cur.offset = pos;
        cur.ended = false;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(cur) = self.current.as_ref() {
            cur.sink.set_volume(volume);
        }
    }

    /// 播放中返回进度；刚播完时返回一次 Ended
    pub(super) fn poll(&mut self) -> Option<Tick> {
        let cur = self.current.as_mut()?;
        if cur.paused || cur.ended {
            return None;
        }
        if cur.sink.empty() {
            cur.ended = true;
            cur.paused = true;
            return Some(Tick::Ended {
                play_id: cur.play_id,
            });
        }
        Some(Tick::Progress {
            play_id: cur.play_id,
            position_ms: (cur.offset + cur.sink.get_pos()).as_millis() as u64,
            duration_ms: cur.duration_ms,
        })
    }
}

fn build_sink(
    mixer: &Mixer,
    path: &Path,
    skip: Option<Duration>,
    title: &str,
) -> Result<(Sink, Option<u64>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        title: title.to_owned(),
        source,
    })?;
    let duration_ms = decoder.total_duration().map(|d| d.as_millis() as u64);
    let source: Box<dyn Source + Send> = match skip {
        Some(skip) => Box::new(decoder.skip_duration(skip)),
        None => Box::new(decoder),
    };

    let sink = Sink::connect_new(mixer);
    sink.append(source);
    Ok((sink, duration_ms))
}
