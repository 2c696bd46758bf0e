use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";
const LOG_FILE_PREFIX: &str = "dirplay.log";

/// 持有后台写日志线程，drop 时刷盘
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// 日志只写文件，不能输出到终端，否则会破坏 TUI 画面
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = resolve_log_dir(data_dir, cfg.dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(resolve_filter(cfg.filter.as_deref()))
        .with(file_layer);

    if let Err(e) = subscriber.try_init() {
        eprintln!("tracing 初始化失败: {e}");
    }
    tracing::info!(log_dir = %log_dir.display(), "tracing 已初始化");

    LogGuard(Some(guard))
}

/// 默认 `{data_dir}/logs`，建不了目录时退回临时目录
fn resolve_log_dir(data_dir: &Path, dir: Option<PathBuf>) -> PathBuf {
    let log_dir = dir.unwrap_or_else(|| data_dir.join("logs"));
    if fs::create_dir_all(&log_dir).is_ok() {
        return log_dir;
    }
    let fallback = std::env::temp_dir().join("dirplay-logs");
    let _ = fs::create_dir_all(&fallback);
    fallback
}

/// 显式过滤串优先，其次 RUST_LOG，最后是默认值
fn resolve_filter(filter: Option<&str>) -> EnvFilter {
    match filter.map(str::trim) {
        Some(s) if !s.is_empty() => {
            EnvFilter::try_new(s).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_defaults_under_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolved = resolve_log_dir(dir.path(), None);
        assert_eq!(resolved, dir.path().join("logs"));
        assert!(resolved.is_dir());
    }

    #[test]
    fn explicit_filter_wins() {
        let filter = resolve_filter(Some("dirplay=trace"));
        assert_eq!(filter.to_string(), "dirplay=trace");
    }
}
