//! 音频播放相关错误

use reqwest::StatusCode;
use std::path::PathBuf;

/// 音频播放错误类型
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// 下载音频失败
    #[error("下载音频失败({title}): {source}")]
    Download {
        title: String,
        #[source]
        source: reqwest::Error,
    },

    /// 下载返回非成功状态码
    #[error("下载音频失败({title}): HTTP {status}")]
    DownloadStatus { title: String, status: StatusCode },

    /// 写入临时文件失败
    #[error("写入临时文件失败({title}): {source}")]
    Write {
        title: String,
        #[source]
        source: std::io::Error,
    },

    /// 打开音频文件失败
    #[error("打开音频文件失败({path}): {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 解码音频失败
    #[error("解码音频失败({title}): {source}")]
    Decode {
        title: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// HTTP 客户端初始化失败
    #[error("初始化 HTTP 客户端失败: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// 音频输出流创建失败
    #[error("创建音频输出流失败: {0}")]
    OutputStream(String),
}

impl AudioError {
    /// 判断是否值得重试（只有网络侧的失败）
    pub fn is_retryable(&self) -> bool {
        match self {
            AudioError::Download { .. } | AudioError::Write { .. } => true,
            AudioError::DownloadStatus { status, .. } => {
                *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_error_display() {
        let err = AudioError::OutputStream("无可用设备".to_string());
        assert_eq!(err.to_string(), "创建音频输出流失败: 无可用设备");
    }

    #[test]
    fn test_is_retryable() {
        let status_err = AudioError::DownloadStatus {
            title: "A - Song1.mp3".to_owned(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert!(status_err.is_retryable());

        let not_found = AudioError::DownloadStatus {
            title: "A - Song1.mp3".to_owned(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(!not_found.is_retryable());
        assert!(!AudioError::OutputStream("x".to_owned()).is_retryable());
    }

    #[test]
    fn test_open_file_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let err = AudioError::OpenFile {
            path: PathBuf::from("/tmp/track.mp3"),
            source: io_err,
        };
        assert!(err.to_string().contains("track.mp3"));
        assert!(err.to_string().contains("文件未找到"));
    }
}
